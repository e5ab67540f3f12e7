//! # Compressor Archive Data Model (`common::archive::file_set`)
//!
//! File: cli/src/common/archive/file_set.rs
//!
//! ## Overview
//!
//! The values that flow into and out of the archiver:
//!
//! - **`UploadedFile`**: one `(name, content)` pair. The name is used verbatim as
//!   the archive entry name; the content may be any length, including zero.
//! - **`FileSet`**: an ordered collection of `UploadedFile`. Insertion order is
//!   the order entries appear in the archive. Duplicate names are allowed.
//! - **`Archive`**: the finished ZIP bytes for one `FileSet`.
//!
use bytes::Bytes;

/// A single named file as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Entry name inside the archive.
    pub name: String,
    /// Raw file bytes.
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Ordered collection of uploaded files for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<UploadedFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file; it will be written after every file already present.
    pub fn push(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadedFile> {
        self.files.iter()
    }

    /// Sum of all content lengths, in bytes.
    pub fn total_content_len(&self) -> u64 {
        self.files.iter().map(|f| f.content.len() as u64).sum()
    }
}

impl From<Vec<UploadedFile>> for FileSet {
    fn from(files: Vec<UploadedFile>) -> Self {
        Self { files }
    }
}

impl FromIterator<UploadedFile> for FileSet {
    fn from_iter<I: IntoIterator<Item = UploadedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a UploadedFile;
    type IntoIter = std::slice::Iter<'a, UploadedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// A complete, finalized ZIP archive.
///
/// Only produced once the writer has been finalized, so holding an `Archive`
/// always means holding a well-formed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    bytes: Vec<u8>,
    entry_count: usize,
}

impl Archive {
    pub(super) fn new(bytes: Vec<u8>, entry_count: usize) -> Self {
        Self { bytes, entry_count }
    }

    /// Number of entries written into the archive.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_set_preserves_insertion_order() {
        let mut set = FileSet::new();
        assert!(set.is_empty());
        set.push(UploadedFile::new("b.txt", "b"));
        set.push(UploadedFile::new("a.txt", "aa"));
        set.push(UploadedFile::new("b.txt", "bbb"));

        let names: Vec<&str> = set.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a.txt", "b.txt"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.total_content_len(), 6);
    }

    #[test]
    fn test_uploaded_file_shares_content_buffer() {
        let content = Bytes::from_static(b"shared payload");
        let file = UploadedFile::new("payload.bin", content.clone());
        assert_eq!(file.content.as_ptr(), content.as_ptr());
        assert_eq!(file.content, content);
    }

    #[test]
    fn test_file_set_collect() {
        let set: FileSet = ["x", "y"]
            .into_iter()
            .map(|n| UploadedFile::new(n, Vec::new()))
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_content_len(), 0);
    }
}
