//! # Compressor Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared modules used by the command handlers. Keeping them here separates
//! command-specific logic (`commands::`) from reusable building blocks.
//!
//! - **`archive`**: The archiver: `FileSet` in, ZIP `Archive` out.
//! - **`fs`**: Reading input files and writing output files atomically.
//! - **`ui`**: Formatting helpers for terminal output and logs.
//!

/// The archive data model and ZIP writer.
pub mod archive;
/// Filesystem operations used by `pack`.
pub mod fs;
/// Human-friendly formatting helpers.
pub mod ui;
