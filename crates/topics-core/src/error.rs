//! Classifier error types.

use thiserror::Error;

/// Errors that can occur while building a classifier.
///
/// Classification itself never fails; these only surface when compiling a
/// custom rule set.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A rule pattern is not a valid regular expression.
    #[error("invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A rule is structurally invalid (e.g. blank label).
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (e.g., reading a rule set file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
