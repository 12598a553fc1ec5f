use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input to a leaf operation, e.g. a negative duration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `build` was called before at least one input and an output were declared.
    #[error("incomplete command: {0}")]
    IncompleteCommand(String),
}

pub type Result<T> = std::result::Result<T, Error>;
