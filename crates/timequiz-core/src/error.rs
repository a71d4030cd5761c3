//! Quiz error types.
//!
//! Only conditions that must stop an operation are errors. Transitions
//! requested from the wrong phase are silent no-ops, not errors.

use thiserror::Error;

/// Errors raised while building a bank or starting a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The bank holds fewer questions than a session needs.
    #[error("question bank has {available} questions, a session needs {required}")]
    InsufficientData { required: usize, available: usize },

    /// A question record is malformed.
    #[error("invalid question at index {index}: {reason}")]
    InvalidData { index: usize, reason: String },
}
