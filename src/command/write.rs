use super::{CommandState, StreamType};
use crate::{Result, duration::format_duration};
use std::time::Duration;

/// Output options, placed after every input.
#[derive(Debug, Clone)]
#[must_use]
pub struct WriteStage {
    state: CommandState,
}

impl WriteStage {
    pub(super) fn from_state(state: CommandState) -> Self {
        Self { state }
    }

    /// Output `-ss`, decodes and discards until `d` (frame accurate).
    pub fn ss(mut self, d: Duration) -> Self {
        self.state.push_write(["-ss".into(), format_duration(d)]);
        self
    }

    /// Output `-to`, stops writing at absolute position `d`.
    pub fn to(mut self, d: Duration) -> Self {
        self.state.push_write(["-to".into(), format_duration(d)]);
        self
    }

    /// Output `-t`, limits the output duration.
    pub fn t(mut self, d: Duration) -> Self {
        self.state.push_write(["-t".into(), format_duration(d)]);
        self
    }

    /// `-c:v <codec>`
    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.state.push_write(["-c:v".into(), codec.into()]);
        self
    }

    /// `-c:a <codec>`
    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.state.push_write(["-c:a".into(), codec.into()]);
        self
    }

    /// `-c:s <codec>`
    pub fn subtitle_codec(mut self, codec: impl Into<String>) -> Self {
        self.state.push_write(["-c:s".into(), codec.into()]);
        self
    }

    /// Sets the codec of one output stream, `-c:<stream>:<index>`.
    pub fn codec_for(mut self, stream: StreamType, index: usize, codec: impl Into<String>) -> Self {
        self.state.push_write([format!("-c:{stream}:{index}"), codec.into()]);
        self
    }

    /// `-c:v copy`
    pub fn copy_video(self) -> Self {
        self.video_codec("copy")
    }

    /// `-c:a copy`
    pub fn copy_audio(self) -> Self {
        self.audio_codec("copy")
    }

    /// Constant rate factor, `-crf <value>`.
    pub fn crf(mut self, value: u8) -> Self {
        self.state.push_write(["-crf".into(), value.to_string()]);
        self
    }

    /// Adds an unchecked output-side token.
    pub fn raw(mut self, token: impl Into<String>) -> Self {
        self.state.push_write([token.into()]);
        self
    }

    /// Sets the output path, replacing any previous one.
    pub fn output(mut self, path: impl Into<String>) -> Self {
        self.state.set_output(path.into());
        self
    }

    /// Assembles the command line.
    ///
    /// Fails with [`Error::IncompleteCommand`](crate::Error::IncompleteCommand)
    /// when no output path was set.
    pub fn build(&self) -> Result<String> {
        self.state.to_command_line()
    }

    /// Same tokens as [`build`](Self::build) without the program, for `Command::args`.
    pub fn build_args(&self) -> Result<Vec<String>> {
        self.state.to_args()
    }

    /// Like [`build`](Self::build) with each token shell-escaped.
    pub fn build_shell(&self) -> Result<String> {
        self.state.to_shell_line()
    }
}
