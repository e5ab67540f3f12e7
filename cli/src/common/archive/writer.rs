//! # Compressor ZIP Writer (`common::archive::writer`)
//!
//! File: cli/src/common/archive/writer.rs
//!
//! ## Overview
//!
//! This module turns a `FileSet` into a ZIP container. It is the core of the
//! application: both `compressor serve` and `compressor pack` hand their files
//! to `build` (or `write_archive`) and never touch the codec directly.
//!
//! ## Architecture
//!
//! The module leverages the `zip` crate for the container format.
//!
//! - The `FileSet` is validated first. An empty set, or an entry with an empty
//!   name, fails with a validation error before any writer is opened.
//! - Entries are written in `FileSet` order, one pass, Deflate-compressed.
//! - The writer is finalized (central directory written) and the sink handed back.
//!
//! The writer is owned by the call. Any early return drops it together with
//! the sink, so an aborted build never leaves state behind. Entry timestamps are
//! pinned to the ZIP epoch, which makes the output byte-for-byte reproducible
//! for a given `FileSet`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, FileSet, UploadedFile};
//!
//! # fn main() -> anyhow::Result<()> {
//! let files: FileSet = vec![
//!     UploadedFile::new("foo.txt", "foo"),
//!     UploadedFile::new("bar.txt", "bar"),
//! ]
//! .into();
//!
//! let archive = archive::build(&files)?;
//! assert_eq!(archive.entry_count(), 2);
//! # Ok(())
//! # }
//! ```
//!
use super::file_set::{Archive, FileSet};
use crate::core::error::ArchiveError;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, trace};
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

/// Entries at or above this size need the ZIP64 extensions.
const ZIP64_THRESHOLD: usize = u32::MAX as usize;

/// # Build Archive (`build`)
///
/// Builds a complete ZIP archive in memory from `files`.
///
/// ## Returns
///
/// * `Ok(Archive)` holding one entry per input file, in input order.
///
/// ## Errors
///
/// * `ArchiveError::EmptyFileSet` / `ArchiveError::EmptyEntryName` if the input
///   fails validation. No bytes are produced.
/// * `ArchiveError::Encoding` if the codec fails while writing.
pub fn build(files: &FileSet) -> Result<Archive, ArchiveError> {
    let capacity = usize::try_from(files.total_content_len()).unwrap_or(0);
    let cursor = write_archive(files, Cursor::new(Vec::with_capacity(capacity)))?;
    let bytes = cursor.into_inner();

    debug!(
        "Built archive with {} entries ({} bytes)",
        files.len(),
        bytes.len()
    );
    Ok(Archive::new(bytes, files.len()))
}

/// # Write Archive to Sink (`write_archive`)
///
/// Writes `files` as a ZIP container into `sink` and returns the sink once the
/// archive has been finalized. Validation runs before the sink is touched.
///
/// ## Arguments
///
/// * `files` - The ordered files to archive.
/// * `sink` - Any seekable writer: an in-memory cursor, a `std::fs::File`, ...
///
/// ## Errors
///
/// Same as [`build`]. On an encoding error the partially written sink is
/// dropped; callers must treat whatever it received as garbage.
pub fn write_archive<W: Write + Seek>(files: &FileSet, sink: W) -> Result<W, ArchiveError> {
    validate(files)?;

    let mut zip = ZipWriter::new(sink);
    let base_options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for file in files {
        trace!("Adding entry '{}' ({} bytes)", file.name, file.content.len());
        let options = base_options.large_file(file.content.len() >= ZIP64_THRESHOLD);
        zip.start_file(file.name.as_str(), options)?;
        zip.write_all(&file.content)?;
    }

    Ok(zip.finish()?)
}

/// Checks the invariants every archived `FileSet` must satisfy.
fn validate(files: &FileSet) -> Result<(), ArchiveError> {
    if files.is_empty() {
        return Err(ArchiveError::EmptyFileSet);
    }
    if let Some(index) = files.iter().position(|f| f.name.is_empty()) {
        return Err(ArchiveError::EmptyEntryName { index });
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::UploadedFile;
    use std::io::{self, Read, SeekFrom};
    use zip::ZipArchive;

    /// Decodes an archive into `(name, content)` pairs in stored order.
    fn decode(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).expect("entry");
                let mut content = Vec::new();
                entry.read_to_end(&mut content).expect("entry content");
                (entry.name().to_string(), content)
            })
            .collect()
    }

    fn file_set(entries: &[(&str, &[u8])]) -> FileSet {
        entries
            .iter()
            .map(|(name, content)| UploadedFile::new(*name, content.to_vec()))
            .collect()
    }

    /// A sink that accepts `limit` bytes and then fails every write.
    #[derive(Debug)]
    struct FailingSink {
        inner: Cursor<Vec<u8>>,
        limit: u64,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.inner.position() + buf.len() as u64 > self.limit {
                return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FailingSink {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_empty_file_set_is_rejected() {
        let result = build(&FileSet::new());
        assert!(matches!(result, Err(ArchiveError::EmptyFileSet)));
    }

    #[test]
    fn test_empty_file_set_never_touches_sink() {
        let sink = FailingSink {
            inner: Cursor::new(Vec::new()),
            limit: 0,
        };
        let result = write_archive(&FileSet::new(), sink);
        assert!(matches!(result, Err(ArchiveError::EmptyFileSet)));
    }

    #[test]
    fn test_empty_entry_name_is_rejected() {
        let files = file_set(&[("ok.txt", b"ok"), ("", b"nameless")]);
        let result = build(&files);
        assert!(matches!(
            result,
            Err(ArchiveError::EmptyEntryName { index: 1 })
        ));
    }

    #[test]
    fn test_empty_entry_name_never_touches_sink() {
        let sink = FailingSink {
            inner: Cursor::new(Vec::new()),
            limit: 0,
        };
        let files = file_set(&[("", b"nameless")]);
        let result = write_archive(&files, sink);
        assert!(matches!(
            result,
            Err(ArchiveError::EmptyEntryName { index: 0 })
        ));
    }

    #[test]
    fn test_single_file() {
        let archive = build(&file_set(&[("foo.txt", b"foo")])).unwrap();
        assert_eq!(archive.entry_count(), 1);
        assert_eq!(
            decode(archive.as_bytes()),
            vec![("foo.txt".to_string(), b"foo".to_vec())]
        );
    }

    #[test]
    fn test_multiple_files_keep_order() {
        let archive = build(&file_set(&[("foo.txt", b"foo"), ("bar.txt", b"bar")])).unwrap();
        assert_eq!(
            decode(archive.as_bytes()),
            vec![
                ("foo.txt".to_string(), b"foo".to_vec()),
                ("bar.txt".to_string(), b"bar".to_vec()),
            ]
        );

        let reversed = build(&file_set(&[("bar.txt", b"bar"), ("foo.txt", b"foo")])).unwrap();
        let names: Vec<String> = decode(reversed.as_bytes())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["bar.txt", "foo.txt"]);
    }

    #[test]
    fn test_zero_length_content() {
        let archive = build(&file_set(&[("empty.txt", b"")])).unwrap();
        let entries = decode(archive.as_bytes());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "empty.txt");
        assert!(entries[0].1.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_separate_entries() {
        let archive = build(&file_set(&[("same.txt", b"first"), ("same.txt", b"second")])).unwrap();
        assert_eq!(
            decode(archive.as_bytes()),
            vec![
                ("same.txt".to_string(), b"first".to_vec()),
                ("same.txt".to_string(), b"second".to_vec()),
            ]
        );
    }

    #[test]
    fn test_binary_content_round_trips_exactly() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let files: FileSet = vec![UploadedFile::new("blob.bin", payload.clone())].into();
        let entries = decode(build(&files).unwrap().as_bytes());
        assert_eq!(entries[0].1, payload);
    }

    #[test]
    fn test_output_is_reproducible() {
        let files = file_set(&[("a.txt", b"alpha"), ("b.txt", b"beta")]);
        let first = build(&files).unwrap();
        let second = build(&files).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_sink_failure_is_encoding_error() {
        let files = file_set(&[("big.txt", &[7u8; 4096])]);
        let sink = FailingSink {
            inner: Cursor::new(Vec::new()),
            limit: 16,
        };
        let err = write_archive(&files, sink).unwrap_err();
        assert!(matches!(err, ArchiveError::Encoding { .. }));
        assert!(!err.is_validation());
    }
}
