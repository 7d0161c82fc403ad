use thiserror::Error;

/// Raised when a comparison involves the UNKNOWN version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("UNKNOWN version is not comparable")]
pub struct IncomparableError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrictParseError {
    #[error("Invalid strict version: {0:?}")]
    Invalid(String),

    #[error("Version component out of range in {0:?}")]
    Overflow(String),
}
