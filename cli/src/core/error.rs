//! # Compressor Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the Compressor
//! application. It provides a consistent approach to error management with
//! detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of three main components:
//! - `ArchiveError`: The errors the archiver itself can produce. It has exactly
//!   two kinds: validation failures (`EmptyFileSet`, `EmptyEntryName`) and
//!   encoding failures (`Encoding`).
//! - `CompressorError`: Application-level errors (configuration, filesystem,
//!   arguments) raised by the command handlers.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling.
//!
//! ## Examples
//!
//! ```rust
//! // Validation is checked before any writer is opened
//! if files.is_empty() {
//!     return Err(ArchiveError::EmptyFileSet);
//! }
//!
//! // Add context to application errors using anyhow
//! let bytes = fs::read(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Errors produced while assembling an archive from a `FileSet`.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("No files were provided; at least one file is required to build an archive.")]
    EmptyFileSet,

    #[error("File at position {index} has an empty name.")]
    EmptyEntryName { index: usize },

    #[error("Failed to encode archive: {source}")]
    Encoding {
        #[from]
        source: zip::result::ZipError,
    },
}

impl ArchiveError {
    /// Returns `true` for errors caused by the caller's input rather than the codec.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ArchiveError::EmptyFileSet | ArchiveError::EmptyEntryName { .. }
        )
    }
}

// Entry bytes are written through `std::io::Write`, so sink failures arrive as
// plain I/O errors. They are still encoding failures.
impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Encoding {
            source: zip::result::ZipError::Io(err),
        }
    }
}

/// Custom error type for the Compressor application.
#[derive(Error, Debug)]
pub enum CompressorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CompressorError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let empty_name = ArchiveError::EmptyEntryName { index: 2 };
        assert_eq!(empty_name.to_string(), "File at position 2 has an empty name.");
    }

    #[test]
    fn test_validation_classification() {
        assert!(ArchiveError::EmptyFileSet.is_validation());
        assert!(ArchiveError::EmptyEntryName { index: 0 }.is_validation());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let encoding = ArchiveError::from(io);
        assert!(!encoding.is_validation());
        assert!(matches!(encoding, ArchiveError::Encoding { .. }));
        assert!(encoding.to_string().contains("disk full"));
    }
}
