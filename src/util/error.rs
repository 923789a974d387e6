//! Error types for the scene-index library.

use thiserror::Error;

/// Main error type for scene-index operations.
///
/// Steady-state queries and notifications never fail: paths outside a
/// mounted subtree produce empty prims and empty child lists, and missing
/// data sources propagate as `None`. Errors only surface from fallible
/// construction, where misuse is detectable up front.
#[derive(Error, Debug)]
pub enum Error {
    /// A filter prefix must be an absolute path
    #[error("Prefix must be an absolute path, got \"{0}\"")]
    RelativePrefix(String),

    /// Absolute tail appended where a relative path is required
    #[error("Expected a relative path, got absolute \"{0}\"")]
    ExpectedRelativePath(String),

    /// A path string failed to parse
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid-path error.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }
}

/// Result type alias for scene-index operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::RelativePrefix("a/b".to_string());
        assert!(e.to_string().contains("a/b"));
        assert!(e.to_string().contains("absolute"));

        let e = Error::other("boom");
        assert_eq!(e.to_string(), "boom");
    }
}
