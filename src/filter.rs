//! Filter expressions in ffmpeg's filtergraph syntax.
//!
//! Three node kinds compose into a graph:
//! * [`AtomicFilter`] `scale=1280:-1`, a name with positional/keyed params.
//! * [`Chain`] `[0:v][1:v]overlay=10:10[out]`, one filter with link labels.
//! * [`Pipeline`] an ordered list of nodes joined with [`Pipeline::SEPARATOR`].
//!
//! Values are immutable once built, rendering never mutates them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that renders into filtergraph syntax.
pub trait Filter: fmt::Display {
    /// Whether the rendered string needs `-filter_complex` routing
    /// rather than a simple per-stream `-vf`.
    fn needs_complex(&self) -> bool;

    fn render(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicFilter {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
}

impl AtomicFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    #[must_use]
    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.params.extend(params.into_iter().map(|p| p.to_string()));
        self
    }
}

impl fmt::Display for AtomicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // an empty name still renders `=p1:p2`, callers use it to inject raw params
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, "={}", self.params.join(":"))?;
        }
        Ok(())
    }
}

impl Filter for AtomicFilter {
    fn needs_complex(&self) -> bool {
        false
    }
}

/// A single filter wired to named link labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    #[serde(default)]
    pub inputs: Vec<String>,
    pub filter: AtomicFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Chain {
    pub fn new(filter: AtomicFilter) -> Self {
        Self {
            inputs: Vec::new(),
            filter,
            output: None,
        }
    }

    #[must_use]
    pub fn input(mut self, label: impl Into<String>) -> Self {
        self.inputs.push(label.into());
        self
    }

    /// Sets the output label. An empty label is the same as none.
    #[must_use]
    pub fn output(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.output = (!label.is_empty()).then_some(label);
        self
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for input in &self.inputs {
            write!(f, "[{input}]")?;
        }
        write!(f, "{}", self.filter)?;
        match self.output.as_deref() {
            Some(out) if !out.is_empty() => write!(f, "[{out}]"),
            _ => Ok(()),
        }
    }
}

impl Filter for Chain {
    fn needs_complex(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub nodes: Vec<FilterNode>,
}

impl Pipeline {
    /// Joins every node, whatever its kind.
    ///
    /// `;` is the filtergraph chain separator. Same-stream filter lists
    /// (`scale=1280:-1,hflip`) are not produced by a pipeline, so several
    /// atomic filters render as unconnected chains (`scale=1280:-1;hflip`)
    /// which ffmpeg rejects as a `-vf` simple filtergraph. Attach one atomic
    /// filter per stream there, or label the nodes with [`Chain`]s.
    pub const SEPARATOR: &'static str = ";";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node(mut self, node: impl Into<FilterNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn push(&mut self, node: impl Into<FilterNode>) {
        self.nodes.push(node.into());
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(Self::SEPARATOR)?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl Filter for Pipeline {
    fn needs_complex(&self) -> bool {
        self.nodes.iter().any(Filter::needs_complex)
    }
}

impl<N: Into<FilterNode>> FromIterator<N> for Pipeline {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Any filter-model value, so pipelines can mix kinds.
///
/// Serialized with a `kind` tag:
/// `{"kind": "chain", "inputs": ["0:v"], "filter": {"name": "hflip"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterNode {
    Atomic(AtomicFilter),
    Chain(Chain),
    Pipeline(Pipeline),
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(a) => fmt::Display::fmt(a, f),
            Self::Chain(c) => fmt::Display::fmt(c, f),
            Self::Pipeline(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl Filter for FilterNode {
    fn needs_complex(&self) -> bool {
        match self {
            Self::Atomic(a) => a.needs_complex(),
            Self::Chain(c) => c.needs_complex(),
            Self::Pipeline(p) => p.needs_complex(),
        }
    }
}

impl From<AtomicFilter> for FilterNode {
    fn from(f: AtomicFilter) -> Self {
        Self::Atomic(f)
    }
}

impl From<Chain> for FilterNode {
    fn from(c: Chain) -> Self {
        Self::Chain(c)
    }
}

impl From<Pipeline> for FilterNode {
    fn from(p: Pipeline) -> Self {
        Self::Pipeline(p)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scale(w: i32, h: i32) -> AtomicFilter {
        AtomicFilter::new("scale").param(w).param(h)
    }

    #[test]
    fn atomic_render() {
        let filter = scale(1280, -1);
        assert_eq!(filter.render(), "scale=1280:-1");
        assert!(!filter.needs_complex());

        assert_eq!(AtomicFilter::new("hflip").render(), "hflip");
        assert_eq!(AtomicFilter::new("").param("param").render(), "=param");
        assert_eq!(AtomicFilter::new("").render(), "");
    }

    #[test]
    fn chain_render() {
        let chain = Chain::new(scale(1280, -1)).input("0:v").output("out");
        assert_eq!(chain.render(), "[0:v]scale=1280:-1[out]");
        assert!(chain.needs_complex());

        let overlay = Chain::new(AtomicFilter::new("overlay").param("W-w-10:10"))
            .input("main")
            .input("logo")
            .output("final_video");
        assert_eq!(overlay.render(), "[main][logo]overlay=W-w-10:10[final_video]");

        let no_output = Chain::new(scale(640, -1)).input("0:v");
        assert_eq!(no_output.render(), "[0:v]scale=640:-1");

        let no_input = Chain::new(AtomicFilter::new("null")).output("null_out");
        assert_eq!(no_input.render(), "null[null_out]");
        assert!(no_input.needs_complex());

        assert_eq!(Chain::new(AtomicFilter::new("null")).output("").output, None);
    }

    #[test]
    fn pipeline_of_atomics() {
        let pipeline = Pipeline::new().node(scale(1280, -1)).node(AtomicFilter::new("hflip"));
        assert_eq!(pipeline.render(), "scale=1280:-1;hflip");
        assert!(!pipeline.needs_complex());
    }

    #[test]
    fn pipeline_mixed() {
        let pipeline = Pipeline::new()
            .node(AtomicFilter::new("format").param("yuv420p"))
            .node(
                Chain::new(AtomicFilter::new("fade").params(["in", "0", "30"]))
                    .input("0:v")
                    .output("faded_video"),
            )
            .node(AtomicFilter::new("setsar").param(1));
        assert_eq!(
            pipeline.render(),
            "format=yuv420p;[0:v]fade=in:0:30[faded_video];setsar=1"
        );
        assert!(pipeline.needs_complex());
    }

    #[test]
    fn pipeline_of_chains() {
        let pipeline: Pipeline = [
            Chain::new(scale(640, -1)).input("0:v").output("scaled"),
            Chain::new(AtomicFilter::new("overlay").param("W-w-10:10"))
                .input("scaled")
                .input("1:v")
                .output("final"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            pipeline.render(),
            "[0:v]scale=640:-1[scaled];[scaled][1:v]overlay=W-w-10:10[final]"
        );
        assert!(pipeline.needs_complex());
    }

    #[test]
    fn empty_pipeline() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.render(), "");
        assert!(!pipeline.needs_complex());
        assert!(pipeline.is_empty());
    }

    #[test]
    fn nested_pipeline_propagates_complex() {
        let inner = Pipeline::new().node(Chain::new(AtomicFilter::new("hflip")).input("0:v"));
        let outer = Pipeline::new().node(AtomicFilter::new("format").param("gray")).node(inner);
        assert_eq!(outer.len(), 2);
        assert_eq!(outer.render(), "format=gray;[0:v]hflip");
        assert!(outer.needs_complex());
    }

    #[test]
    fn render_is_repeatable() {
        let pipeline = Pipeline::new()
            .node(Chain::new(scale(1280, -1)).input("0:v").output("a"))
            .node(AtomicFilter::new("hflip"));
        let snapshot = pipeline.clone();
        assert_eq!(pipeline.render(), pipeline.render());
        assert_eq!(pipeline.to_string(), pipeline.render());
        assert_eq!(pipeline, snapshot);
    }

    #[test]
    fn deserialize_graph_from_json() {
        let json = r#"{
            "nodes": [
                {"kind": "chain", "inputs": ["0:v"], "filter": {"name": "scale", "params": ["640", "-1"]}, "output": "scaled"},
                {"kind": "atomic", "name": "hflip"},
                {"kind": "pipeline", "nodes": [{"kind": "atomic", "name": "setsar", "params": ["1"]}]}
            ]
        }"#;
        let pipeline: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(pipeline.render(), "[0:v]scale=640:-1[scaled];hflip;setsar=1");
        assert!(pipeline.needs_complex());

        let again: Pipeline = serde_json::from_str(&serde_json::to_string(&pipeline).unwrap()).unwrap();
        assert_eq!(again, pipeline);
    }
}
