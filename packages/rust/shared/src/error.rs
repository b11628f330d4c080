//! Error types for Lokalize.
//!
//! Library crates use [`LokalizeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Lokalize operations.
#[derive(Debug, thiserror::Error)]
pub enum LokalizeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a source page.
    #[error("network error: {0}")]
    Network(String),

    /// HTML parsing or content extraction error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Knowledge-base or generation service error (remote call failed).
    #[error("service error: {0}")]
    Service(String),

    /// Data validation error (bad chunk parameters, empty input, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LokalizeError>;

impl LokalizeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a service error from any displayable message.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = LokalizeError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = LokalizeError::validation("chunk overlap must be smaller than chunk size");
        assert!(err.to_string().contains("chunk overlap"));

        let err = LokalizeError::service("HTTP 503 from retrieval endpoint");
        assert_eq!(err.to_string(), "service error: HTTP 503 from retrieval endpoint");
    }
}
