//! # Compressor CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through `compressor_cmd()`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Returns an `assert_cmd::Command` for the compiled `compressor` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn compressor_cmd() -> Command {
    Command::cargo_bin("compressor").expect("Failed to find compressor binary for testing")
}

/// Reads every entry of a ZIP archive as `(name, content)` pairs, in order.
pub fn read_entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut zip = ZipArchive::new(Cursor::new(bytes)).expect("output is not a valid ZIP archive");
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).expect("failed to open entry");
            let mut content = Vec::new();
            entry.read_to_end(&mut content).expect("failed to read entry");
            (entry.name().to_string(), content)
        })
        .collect()
}
