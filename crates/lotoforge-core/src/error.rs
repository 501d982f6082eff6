//! Error types for LotoForge

use thiserror::Error;

/// Main error type for LotoForge domain construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotoError {
    /// A number outside `1..=25` was supplied.
    #[error("number {0} is outside 1..={max}", max = crate::MAX_NUMBER)]
    NumberOutOfRange(u8),

    /// The same number appeared more than once.
    #[error("number {0} appears more than once")]
    DuplicateNumber(u8),

    /// A selection did not contain exactly 15 numbers.
    #[error("expected {expected} numbers, got {actual}")]
    WrongCardinality { expected: usize, actual: usize },

    /// A range with `min > max`.
    #[error("invalid range {min}..={max}")]
    InvalidRange { min: u32, max: u32 },

    /// Two draws share a contest number.
    #[error("contest {0} appears more than once in the history")]
    DuplicateContest(u32),

    /// Unknown constraint type name.
    #[error("unknown constraint type: {0}")]
    UnknownConstraint(String),
}

/// Result type alias for LotoForge domain operations
pub type Result<T> = std::result::Result<T, LotoError>;
