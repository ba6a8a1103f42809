//! File operation errors with context.
//!
//! Wraps [`std::io::Error`] with the path involved, what the file was for and
//! which component asked, so a failure reads as "Failed reading file 'x' for
//! module descriptor (cli::make_pom)" instead of a bare "No such file".

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of file operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Read,
    Write,
    CreateDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

/// An I/O error with file context attached
#[derive(Error, Debug)]
#[error("File operation failed: {operation} {}", file_path.display())]
pub struct FileOperationError {
    pub operation: FileOperation,
    pub file_path: PathBuf,
    /// What the file is for, e.g. "module descriptor"
    pub purpose: String,
    /// Component that performed the operation
    pub caller: String,
    #[source]
    pub source: std::io::Error,
}

impl FileOperationError {
    pub fn new(
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self {
            operation,
            file_path: file_path.into(),
            purpose: purpose.into(),
            caller: caller.into(),
            source,
        }
    }

    /// Whether the underlying error means the file simply is not there.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }

    /// Human readable message including a hint for common failure kinds.
    pub fn user_message(&self) -> String {
        let mut message = format!(
            "Failed {} file '{}' for {} ({})",
            self.operation,
            self.file_path.display(),
            self.purpose,
            self.caller
        );

        match self.source.kind() {
            std::io::ErrorKind::NotFound => {
                message.push_str("\n\nThe file does not exist at the specified path.");
            }
            std::io::ErrorKind::PermissionDenied => {
                message.push_str(&format!(
                    "\n\nPermission denied. Check file/directory permissions for: {}",
                    self.file_path.display()
                ));
            }
            std::io::ErrorKind::InvalidData => {
                message.push_str("\n\nThe file contains invalid data or encoding.");
                message.push_str("\nEnsure the file contains valid UTF-8 text.");
            }
            _ => {
                message.push_str(&format!("\n\nError details: {}", self.source));
            }
        }

        message
    }
}

/// Extension trait adding file context to `io::Result`.
pub trait FileResultExt<T> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: &Path,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for Result<T, std::io::Error> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: &Path,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError> {
        self.map_err(|io_error| {
            FileOperationError::new(operation, file_path, purpose, caller, io_error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_file_context_not_found() {
        let path = Path::new("/nonexistent/pomgen/module.toml");
        let result = std::fs::read_to_string(path).with_file_context(
            FileOperation::Read,
            path,
            "module descriptor",
            "test",
        );

        let error = result.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.operation, FileOperation::Read);

        let message = error.user_message();
        assert!(message.contains("Failed reading file"));
        assert!(message.contains("module descriptor"));
        assert!(message.contains("does not exist"));
    }

    #[test]
    fn test_display_includes_path() {
        let error = FileOperationError::new(
            FileOperation::Write,
            "out/pom.xml",
            "generated POM",
            "templating",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error.to_string(), "File operation failed: writing out/pom.xml");
        assert!(error.user_message().contains("Permission denied"));
    }
}
