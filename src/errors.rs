//! Error types for ticker and binding operations

use thiserror::Error;

/// Errors that can occur while configuring a tick source or item service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    /// A tick source needs a non-zero period
    #[error("Tick interval must be greater than zero")]
    InvalidInterval,

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for ticker operations
pub type TickerResult<T> = Result<T, TickerError>;

impl From<serde_json::Error> for TickerError {
    fn from(err: serde_json::Error) -> Self {
        TickerError::Configuration(err.to_string())
    }
}
