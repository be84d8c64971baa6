//! Common error types for CrowdCheck

use thiserror::Error;

/// Common result type for CrowdCheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types across the CrowdCheck core
#[derive(Error, Debug)]
pub enum Error {
    /// No ratings recorded; a credibility score cannot be computed.
    /// Callers must render "not yet rated", never a numeric score.
    #[error("Insufficient data: no ratings recorded")]
    InsufficientData,

    /// Quiz submitted before every question was answered. Recoverable:
    /// the caller re-prompts for the unanswered questions.
    #[error("Incomplete submission: {missing} unanswered question(s)")]
    IncompleteSubmission { missing: usize },

    /// Mutation attempted on a finalized quiz session. Indicates a
    /// caller bug, not user error.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Rating value or confidence outside the 1-5 scale
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Structurally invalid quiz (option count, duplicate ids, etc.)
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
