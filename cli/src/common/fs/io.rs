//! # Compressor Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Filesystem helpers for the `pack` command, wrapping `std::fs` with error
//! context:
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing;
//!   fails if the path exists but is not a directory.
//! - **`read_file_bytes`**: Reads a regular file fully into memory.
//! - **`write_file_atomic`**: Writes bytes to a sibling `.partial` file and
//!   renames it into place, so readers never observe a half-written archive.
//!
use crate::core::error::{CompressorError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(CompressorError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads a regular file into memory.
///
/// Directories are rejected; archives hold flat files only.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    if path.is_dir() {
        anyhow::bail!(CompressorError::FileSystem(format!(
            "Expected a file but found a directory: {:?}",
            path
        )));
    }
    fs::read(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// A `.partial` file that is removed on drop unless committed.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn beside(target: &Path) -> Self {
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        Self {
            path: target.with_file_name(name),
            committed: false,
        }
    }

    fn commit(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)
            .with_context(|| format!("Failed to move {:?} into place at {:?}", self.path, target))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed || !self.path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove partial file {:?}: {}", self.path, e);
        }
    }
}

/// Writes `content` to `path` atomically.
///
/// The parent directory is created if needed. With `overwrite == false` an
/// existing file at `path` is an error and is left untouched.
pub fn write_file_atomic(path: &Path, content: &[u8], overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        anyhow::bail!(CompressorError::FileSystem(format!(
            "Refusing to overwrite existing file {:?} (use --force)",
            path
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    let partial = PartialFile::beside(path);
    fs::write(&partial.path, content)
        .with_context(|| format!("Failed to write to file {:?}", partial.path))?;
    partial.commit(path)?;

    info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;

        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_file_bytes_rejects_directory() -> Result<()> {
        let base_dir = tempdir()?;
        assert!(read_file_bytes(base_dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_write_file_atomic_creates_parents() -> Result<()> {
        let base_dir = tempdir()?;
        let target = base_dir.path().join("out/nested/archive.zip");

        write_file_atomic(&target, b"PK", false)?;

        assert_eq!(read_file_bytes(&target)?, b"PK");
        assert!(!base_dir.path().join("out/nested/archive.zip.partial").exists());
        Ok(())
    }

    #[test]
    fn test_write_file_atomic_respects_overwrite_flag() -> Result<()> {
        let base_dir = tempdir()?;
        let target = base_dir.path().join("archive.zip");
        fs::write(&target, "old")?;

        assert!(write_file_atomic(&target, b"new", false).is_err());
        assert_eq!(fs::read(&target)?, b"old");

        write_file_atomic(&target, b"new", true)?;
        assert_eq!(fs::read(&target)?, b"new");
        Ok(())
    }

    #[test]
    fn test_partial_file_removed_when_not_committed() -> Result<()> {
        let base_dir = tempdir()?;
        let target = base_dir.path().join("archive.zip");
        let partial_path = {
            let partial = PartialFile::beside(&target);
            fs::write(&partial.path, "half")?;
            partial.path.clone()
        };
        assert!(!partial_path.exists());
        assert!(!target.exists());
        Ok(())
    }
}
