//! # Compressor Multipart Upload Adapter
//!
//! File: cli/src/commands/serve/upload.rs
//!
//! ## Overview
//!
//! Decodes a `multipart/form-data` request body into a `FileSet`. Every part
//! named `files` becomes one `UploadedFile`, in the order the client sent them.
//! Parts with any other name are skipped.
//!
//! Submitted file names are reduced to their final path component, so a client
//! sending `../etc/passwd` produces an entry called `passwd`. A part whose name
//! is missing or reduces to nothing is rejected.
//!
use crate::common::archive::{FileSet, UploadedFile};
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, trace};

/// Multipart field name carrying the files to archive.
pub const FILES_FIELD: &str = "files";

/// Failures while turning a request body into a `FileSet`.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read multipart body: {0}")]
    Malformed(String),

    #[error("Request body exceeds the configured size limit")]
    TooLarge,

    #[error("Part {index} of field 'files' has no usable file name")]
    MissingFileName { index: usize },
}

/// # Read File Set (`read_file_set`)
///
/// Drains `multipart` and collects its `files` parts into a `FileSet`.
/// An empty result is returned as-is; rejecting it is the archiver's job.
pub async fn read_file_set(mut multipart: Multipart) -> Result<FileSet, UploadError> {
    let mut files = FileSet::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(classify)?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != FILES_FIELD {
            debug!("Ignoring multipart field '{}'", field_name);
            continue;
        }

        let index = files.len();
        let name = field
            .file_name()
            .and_then(entry_name)
            .ok_or(UploadError::MissingFileName { index })?;

        let content = field
            .bytes()
            .await
            .map_err(classify)?;

        trace!("Received part {} '{}' ({} bytes)", index, name, content.len());
        files.push(UploadedFile::new(name, content));
    }

    Ok(files)
}

// The extractor itself fails before the handler runs when the request has no
// usable boundary.
impl From<MultipartRejection> for UploadError {
    fn from(rejection: MultipartRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Malformed(rejection.body_text())
        }
    }
}

/// Separates body-limit rejections from genuinely malformed input.
fn classify(err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge
    } else {
        UploadError::Malformed(err.body_text())
    }
}

/// Reduces a client-supplied file name to its last path component.
///
/// Both `/` and `\` count as separators since browsers on Windows may send
/// either. The component is otherwise kept verbatim, whitespace included.
/// Returns `None` when it is blank, `.` or `..`.
pub fn entry_name(submitted: &str) -> Option<String> {
    let base = submitted
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    match base.trim() {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_plain() {
        assert_eq!(entry_name("foo.txt").as_deref(), Some("foo.txt"));
        assert_eq!(entry_name("with space.txt").as_deref(), Some("with space.txt"));
    }

    #[test]
    fn test_entry_name_keeps_surrounding_whitespace() {
        assert_eq!(entry_name(" report .txt ").as_deref(), Some(" report .txt "));
        assert_eq!(entry_name("dir/ padded.txt").as_deref(), Some(" padded.txt"));
    }

    #[test]
    fn test_entry_name_strips_directories() {
        assert_eq!(entry_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(entry_name("dir/sub/file.bin").as_deref(), Some("file.bin"));
        assert_eq!(entry_name("C:\\Users\\me\\report.pdf").as_deref(), Some("report.pdf"));
    }

    #[test]
    fn test_entry_name_rejects_empty_and_dots() {
        assert_eq!(entry_name(""), None);
        assert_eq!(entry_name("   "), None);
        assert_eq!(entry_name("."), None);
        assert_eq!(entry_name(".."), None);
        assert_eq!(entry_name("foo/"), None);
        assert_eq!(entry_name("../.."), None);
    }
}
