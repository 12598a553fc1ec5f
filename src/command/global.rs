use super::{CommandState, LogLevel, ReadStage};

/// Options placed before every input.
#[derive(Debug, Clone)]
#[must_use]
pub struct GlobalStage {
    state: CommandState,
}

impl GlobalStage {
    pub(super) fn from_state(state: CommandState) -> Self {
        Self { state }
    }

    /// Adds the global `-y` flag, overwriting the output without asking.
    pub fn overwrite(mut self) -> Self {
        self.state.push_global(["-y".into()]);
        self
    }

    /// Adds `-hide_banner`.
    pub fn hide_banner(mut self) -> Self {
        self.state.push_global(["-hide_banner".into()]);
        self
    }

    /// Adds `-loglevel <level>`.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.state.push_global(["-loglevel".into(), level.to_string()]);
        self
    }

    /// Adds an unchecked token ahead of the inputs.
    pub fn raw(mut self, token: impl Into<String>) -> Self {
        self.state.push_global([token.into()]);
        self
    }

    /// Declares the first input (`-i <path>`).
    pub fn input(self, path: impl Into<String>) -> ReadStage {
        log::trace!("global -> read");
        ReadStage::from_state(self.state).input(path)
    }
}
