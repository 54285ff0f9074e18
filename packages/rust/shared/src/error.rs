//! Error types for docweld.
//!
//! Library crates use [`DocweldError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docweld operations.
#[derive(Debug, thiserror::Error)]
pub enum DocweldError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A link failed the base-URL-or-root-relative test and cannot be
    /// mapped to a local file.
    #[error("link '{url}' is not an internal URL")]
    UnresolvableLink { url: String },

    /// Navigation fragment or seed index parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (lint violations, malformed trees, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocweldError>;

impl DocweldError {
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

    /// Create an unresolvable-link error for the given URL.
    pub fn unresolvable(url: impl Into<String>) -> Self {
        Self::UnresolvableLink { url: url.into() }
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
        let err = DocweldError::config("missing base_url");
        assert_eq!(err.to_string(), "config error: missing base_url");

        let err = DocweldError::unresolvable("https://elsewhere.example/page");
        assert_eq!(
            err.to_string(),
            "link 'https://elsewhere.example/page' is not an internal URL"
        );
    }
}
