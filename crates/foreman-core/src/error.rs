//! Error types for the job board library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all board operations.
///
/// The taxonomy mirrors how failures surface to the user: validation
/// failures abort the operation with a message, not-found conditions on
/// updates are reported, and storage problems carry the offending path.
/// No operation can leave the persisted document half-written, so there is
/// no recoverable/fatal split.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Job not found for the given ID
    #[error("Job '{id}' not found")]
    JobNotFound { id: String },
    /// No jobs were created in the requested year
    #[error("No jobs to export for {year}")]
    NothingToExport { year: String },
    /// No archived jobs exist for the requested year
    #[error("No archived jobs found for {year}")]
    ArchiveNotFound { year: String },
    /// The current year can never be reloaded from the archive
    #[error("Current year jobs are already loaded ({year})")]
    CurrentYearReload { year: String },
    /// The supplied passphrase did not match
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,
    /// No active session; the caller must log in first
    #[error("Not logged in; run `foreman login` first")]
    NotAuthenticated,
    /// File system operation errors
    #[error("Storage error at '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialization/deserialization errors for the persisted document
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BoardError {
        BoardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BoardError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a storage error tagged with the path being accessed.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait mapping I/O results into storage errors with a path.
pub trait StorageResultExt<T> {
    /// Attach the path being read or written to an I/O error.
    fn at_path(self, path: &std::path::Path) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, std::io::Error> {
    fn at_path(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| BoardError::storage(path, e))
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_builder_formats_field_and_reason() {
        let err = BoardError::invalid_input("name").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );
    }

    #[test]
    fn storage_errors_carry_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BoardError::storage("/tmp/board.json", io);
        assert!(err.to_string().contains("/tmp/board.json"));
    }

    #[test]
    fn at_path_maps_io_results() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let mapped = res.at_path(std::path::Path::new("/data/x"));
        assert!(matches!(mapped, Err(BoardError::Storage { .. })));
    }
}
