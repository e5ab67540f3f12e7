//! # Compressor Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command. Currently this is the error
//! system: the archiver's `ArchiveError`, the application's `CompressorError`,
//! and the `Result` alias used by command handlers.
//!
//! ```rust
//! use crate::core::error::{ArchiveError, CompressorError, Result};
//! ```
//!
pub mod error;
