use super::{CommandState, FilterStage, WriteStage};
use crate::duration::format_duration;
use std::time::Duration;

/// Options of the most recently declared input.
///
/// `-ss`, `-to` and `-t` given here land before that input's `-i`, so ffmpeg
/// applies them while demuxing (fast, keyframe-aligned seek).
#[derive(Debug, Clone)]
#[must_use]
pub struct ReadStage {
    state: CommandState,
}

impl ReadStage {
    pub(super) fn from_state(state: CommandState) -> Self {
        Self { state }
    }

    /// Input `-ss`, start reading at `d`.
    pub fn ss(mut self, d: Duration) -> Self {
        self.state.push_input_option("-ss", format_duration(d));
        self
    }

    /// Input `-to`, stop reading at absolute position `d`.
    pub fn to(mut self, d: Duration) -> Self {
        self.state.push_input_option("-to", format_duration(d));
        self
    }

    /// Input `-t`, read at most `d`.
    pub fn t(mut self, d: Duration) -> Self {
        self.state.push_input_option("-t", format_duration(d));
        self
    }

    /// Declares another input, following options apply to it.
    pub fn input(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        log::trace!("input #{} {path:?}", self.state.inputs);
        self.state.push_input(path);
        self
    }

    /// Starts a filter graph for the current input.
    pub fn filter(self) -> FilterStage {
        let input = self.state.current_input();
        log::trace!("read -> filter (input #{input})");
        FilterStage::from_state(self.state, input)
    }

    /// Sets the output path and moves on to output options.
    pub fn output(self, path: impl Into<String>) -> WriteStage {
        log::trace!("read -> write");
        WriteStage::from_state(self.state).output(path)
    }
}
