/// Error types for host calls, rewriting and configuration
use thiserror::Error;

/// A call through the extension bridge failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The browser API rejected the call
    #[error("{operation} failed: {message}")]
    Bridge {
        operation: &'static str,
        message: String,
    },

    /// The browser API answered with something we could not read
    #[error("unexpected {operation} result: {message}")]
    Payload {
        operation: &'static str,
        message: String,
    },
}

/// Rewriting a URL through the template failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("field '{field}' needs parameter '{param}', which the URL does not have")]
    MissingField { field: String, param: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid redirect config: {0}")]
    Json(#[from] serde_json::Error),
}
