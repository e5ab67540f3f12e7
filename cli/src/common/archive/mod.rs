//! # Compressor Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module serves as the main interface for archive assembly. It takes an
//! ordered set of named files and produces a single ZIP container that any
//! standard reader can extract byte-for-byte.
//!
//! ## Architecture
//!
//! - **`file_set`**: The data model (`UploadedFile`, `FileSet`, `Archive`).
//! - **`writer`**: Validation and ZIP encoding (`build`, `write_archive`).
//!
//! Nothing here depends on HTTP or the filesystem. The HTTP handler and the
//! `pack` command each adapt their inputs into a `FileSet` and call `build`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, FileSet, UploadedFile};
//!
//! # fn run() -> anyhow::Result<()> {
//! let mut files = FileSet::new();
//! files.push(UploadedFile::new("foo.txt", "foo"));
//!
//! let archive = archive::build(&files)?;
//! std::fs::write("out.zip", archive.as_bytes())?;
//! # Ok(())
//! # }
//! ```
//!

pub mod file_set;
pub mod writer;

pub use file_set::{Archive, FileSet, UploadedFile};
pub use writer::{build, write_archive};

/// MIME type of the produced container.
pub const CONTENT_TYPE: &str = "application/zip";
