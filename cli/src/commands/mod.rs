//! # Compressor Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the Compressor CLI and
//! makes them accessible to the main application entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `pack`: Bundle local files into a ZIP archive on disk
//! - `serve`: Run the HTTP service that turns uploads into ZIP downloads
//!
//! Each command defines its own arguments structure and handler function.
//!

/// Local archive creation (`compressor pack`).
pub mod pack;
/// The HTTP archive service (`compressor serve`). Includes configuration, handlers and server logic.
pub mod serve;
