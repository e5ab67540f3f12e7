//! # Compressor UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Small helpers for presenting values to people, in terminal output and logs.
//!

/// # Format Byte Size (`human_readable_size`)
///
/// Converts a size in bytes into a human-readable string using B, KB, MB, GB,
/// TB or PB. Bytes are shown without decimals, larger units with one decimal place.
pub fn human_readable_size(size: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if size == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let exponent = ((size as f64).ln() / base.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = size as f64 / base.powi(exponent as i32);

    if exponent == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.1} {}", scaled, UNITS[exponent])
    }
}
