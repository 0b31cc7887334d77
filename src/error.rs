//! Error types for pattern matching

use thiserror::Error;

/// Main error type for match construction and evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Strict evaluation scanned every case and none matched
    #[error("No case matched input: {input}")]
    Exhausted {
        /// Debug rendering of the offending input
        input: String,
    },

    /// The value of an unsuccessful match result was requested
    #[error("Match result is not successful")]
    NotSuccessful,

    /// A required argument was rejected while building a pattern or match
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A registry key is already bound to a value of another type
    #[error("Registry entry '{key}' does not hold a {expected}")]
    RegistryTypeMismatch {
        /// The registry key
        key: String,
        /// Type name that was requested
        expected: &'static str,
    },

    /// Configuration is invalid or could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for MatchError {
    fn from(err: serde_yaml::Error) -> Self {
        MatchError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Config(err.to_string())
    }
}

/// Result type alias for matching operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error chain helper for adding context
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| match e {
            MatchError::Config(inner) => MatchError::Config(format!("{}: {}", msg.into(), inner)),
            MatchError::InvalidArgument(inner) => {
                MatchError::InvalidArgument(format!("{}: {}", msg.into(), inner))
            }
            other => other,
        })
    }
}
