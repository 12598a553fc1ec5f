use super::{CommandState, WriteStage};
use crate::filter::{Filter, FilterNode, Pipeline};

/// Collects filters for one input into a single pipeline.
#[derive(Debug, Clone)]
#[must_use]
pub struct FilterStage {
    state: CommandState,
    input: usize,
    pipeline: Pipeline,
}

impl FilterStage {
    pub(super) fn from_state(state: CommandState, input: usize) -> Self {
        Self {
            state,
            input,
            pipeline: Pipeline::new(),
        }
    }

    /// Zero-based index of the input this stage was opened for.
    pub fn input_index(&self) -> usize {
        self.input
    }

    /// Appends an atomic filter, a chain or a whole pipeline.
    pub fn add(mut self, filter: impl Into<FilterNode>) -> Self {
        self.pipeline.push(filter);
        self
    }

    /// Renders the collected pipeline and moves on to output options.
    ///
    /// Nothing is recorded if no filter was added.
    pub fn done(mut self) -> WriteStage {
        if !self.pipeline.is_empty() {
            let graph = self.pipeline.render();
            let complex = self.pipeline.needs_complex();
            log::trace!("input #{} filter graph {graph:?} (complex: {complex})", self.input);
            self.state.push_filter(graph, complex);
        }
        log::trace!("filter -> write");
        WriteStage::from_state(self.state)
    }
}
