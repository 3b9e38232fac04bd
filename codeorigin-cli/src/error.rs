//! Errors surfaced by the detection facade

use thiserror::Error;

/// Input rejected before the engine runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("No code provided")]
    EmptyInput,

    #[error("Code too short for analysis ({len} characters, minimum {min})")]
    TooShort { len: usize, min: usize },

    #[error("Code too large for analysis ({len} characters, maximum {max})")]
    Oversize { len: usize, max: usize },
}

impl DetectError {
    /// True for size-policy violations on the large side
    pub fn is_oversize(&self) -> bool {
        matches!(self, DetectError::Oversize { .. })
    }
}

pub type DetectResult<T> = Result<T, DetectError>;
