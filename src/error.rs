//! Error types for Classlens

use thiserror::Error;

/// Errors that can occur while loading or aggregating an activity log
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed log line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid bucket interval: {0} (must be > 0)")]
    InvalidInterval(u32),
}
