//! Staged ffmpeg command construction.
//!
//! A session moves through [`GlobalStage`] → [`ReadStage`] → ([`FilterStage`]) →
//! [`WriteStage`], each stage owning the accumulated tokens and exposing only the
//! options that are meaningful at that position of the command line.
mod filter;
mod global;
mod read;
mod write;

pub use filter::FilterStage;
pub use global::GlobalStage;
pub use read::ReadStage;
pub use write::WriteStage;

use crate::{Error, Result};
use std::{borrow::Cow, fmt};

const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Starts a new `ffmpeg ...` command.
pub fn new() -> GlobalStage {
    with_program(DEFAULT_PROGRAM)
}

/// Starts a new command invoking `program` instead of `ffmpeg`, e.g. a full path.
pub fn with_program(program: impl Into<String>) -> GlobalStage {
    GlobalStage::from_state(CommandState::new(program.into()))
}

/// Stream specifier used by `-c:<stream>:<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
}

impl StreamType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "v",
            Self::Audio => "a",
            Self::Subtitle => "s",
            Self::Data => "d",
            Self::Attachment => "t",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named values of `-loglevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Quiet,
    Panic,
    Fatal,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderedFilter {
    graph: String,
    complex: bool,
}

/// Token accumulator shared by the stages of one session.
///
/// Serialized as `program global* read* write* [filter-flag graph] output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandState {
    program: String,
    global: Vec<String>,
    read: Vec<String>,
    write: Vec<String>,
    output: Option<String>,
    filters: Vec<RenderedFilter>,
    inputs: usize,
    /// Index in `read` where options of the newest input go, i.e. its `-i`.
    input_options_at: usize,
}

impl CommandState {
    fn new(program: String) -> Self {
        Self {
            program,
            global: Vec::new(),
            read: Vec::new(),
            write: Vec::new(),
            output: None,
            filters: Vec::new(),
            inputs: 0,
            input_options_at: 0,
        }
    }

    fn push_global(&mut self, tokens: impl IntoIterator<Item = String>) {
        self.global.extend(tokens);
    }

    fn push_input(&mut self, path: String) {
        self.input_options_at = self.read.len();
        self.read.push("-i".into());
        self.read.push(path);
        self.inputs += 1;
    }

    /// Places `flag value` ahead of the newest input's `-i`, after any
    /// options already given to that input.
    fn push_input_option(&mut self, flag: &str, value: String) {
        let at = self.input_options_at;
        self.read.insert(at, flag.to_owned());
        self.read.insert(at + 1, value);
        self.input_options_at += 2;
    }

    fn push_write(&mut self, tokens: impl IntoIterator<Item = String>) {
        self.write.extend(tokens);
    }

    fn set_output(&mut self, path: String) {
        if let Some(previous) = &self.output {
            log::trace!("output {previous:?} replaced by {path:?}");
        }
        self.output = Some(path);
    }

    fn push_filter(&mut self, graph: String, complex: bool) {
        self.filters.push(RenderedFilter { graph, complex });
    }

    fn current_input(&self) -> usize {
        self.inputs.saturating_sub(1)
    }

    /// All tokens after the program name.
    fn to_args(&self) -> Result<Vec<String>> {
        if self.inputs == 0 {
            return Err(Error::IncompleteCommand("no input declared".into()));
        }
        let output = match self.output.as_deref() {
            Some(out) if !out.is_empty() => out,
            _ => return Err(Error::IncompleteCommand("no output path declared".into())),
        };

        let mut args = Vec::with_capacity(
            self.global.len() + self.read.len() + self.write.len() + 3,
        );
        args.extend(self.global.iter().cloned());
        args.extend(self.read.iter().cloned());
        args.extend(self.write.iter().cloned());

        if !self.filters.is_empty() {
            let complex = self.filters.iter().any(|f| f.complex);
            let graph = self
                .filters
                .iter()
                .map(|f| f.graph.as_str())
                .collect::<Vec<_>>()
                .join(crate::Pipeline::SEPARATOR);
            args.push(if complex { "-filter_complex" } else { "-vf" }.into());
            args.push(graph);
        }

        args.push(output.to_owned());
        Ok(args)
    }

    fn to_command_line(&self) -> Result<String> {
        let args = self.to_args()?;
        let mut line = self.program.clone();
        for arg in &args {
            line.push(' ');
            line.push_str(arg);
        }
        log::debug!("built command: {line}");
        Ok(line)
    }

    fn to_shell_line(&self) -> Result<String> {
        let args = self.to_args()?;
        let line = std::iter::once(&self.program)
            .chain(&args)
            .map(|token| shell_escape::escape(Cow::Borrowed(token.as_str())))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(line)
    }
}
