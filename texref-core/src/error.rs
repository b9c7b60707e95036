//! Typed error handling for texref.
//!
//! Provides structured errors that library consumers can match on,
//! with the path that caused the failure wherever one exists.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for texref operations.
#[derive(Error, Debug)]
pub enum TexrefError {
    /// I/O error when reading a document or writing output.
    ///
    /// The OS message is carried by `source`, so an error chain prints it once.
    #[error("Cannot access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// An `\input{...}` names a file that does not exist
    #[error("File {path} does not exist (included from {included_from})")]
    MissingInput {
        path: PathBuf,
        included_from: PathBuf,
    },

    /// A document includes itself, directly or through other inputs
    #[error("Input cycle: {path} is already being expanded")]
    InputCycle { path: PathBuf },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl TexrefError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing-input error.
    pub fn missing_input(path: impl Into<PathBuf>, included_from: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            path: path.into(),
            included_from: included_from.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True when the input document itself could not be found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source: Some(e), .. } => e.kind() == std::io::ErrorKind::NotFound,
            Self::MissingInput { .. } => true,
            _ => false,
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::MissingInput { path, .. } => Some(path),
            Self::InputCycle { path } => Some(path),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// Convenience type alias for texref results.
pub type TexrefResult<T> = Result<T, TexrefError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> TexrefResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> TexrefResult<T> {
        self.map_err(|e| TexrefError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = TexrefError::io(
            PathBuf::from("/thesis/main.tex"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, TexrefError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/thesis/main.tex")));
        assert!(err.to_string().contains("/thesis/main.tex"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_permission_denied_is_not_not_found() {
        let err = TexrefError::io(
            "locked.tex",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_missing_input_message() {
        let err = TexrefError::missing_input("chapters/intro.tex", "main.tex");
        let msg = err.to_string();
        assert!(msg.contains("chapters/intro.tex"));
        assert!(msg.contains("main.tex"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_argument_has_no_path() {
        let err = TexrefError::invalid_argument("width must be positive");
        assert!(err.path().is_none());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let texref_result = result.with_path("/missing/file.tex");
        assert!(matches!(texref_result, Err(TexrefError::Io { .. })));
    }
}
