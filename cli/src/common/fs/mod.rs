//! # Compressor Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the `pack` command: reading input files and
//! writing the finished archive without ever exposing a partial file.
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! # fn run_example() -> anyhow::Result<()> {
//! let bytes = io::read_file_bytes(Path::new("notes.txt"))?;
//! io::write_file_atomic(Path::new("out/notes.zip"), &bytes, false)?;
//! # Ok(())
//! # }
//! ```
//!

/// Contains basic file I/O operations (`ensure_dir_exists`, `read_file_bytes`, `write_file_atomic`).
pub mod io;
