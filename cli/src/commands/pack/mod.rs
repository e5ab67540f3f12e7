//! # Compressor Pack Command
//!
//! File: cli/src/commands/pack/mod.rs
//!
//! ## Overview
//!
//! `compressor pack` bundles local files into a ZIP archive on disk using the
//! same archiver as the HTTP service. Each file becomes one entry named after
//! the file itself (its final path component), in command-line order.
//!
//! ## Examples
//!
//! ```bash
//! compressor pack -o bundle.zip notes.txt data/report.csv
//!
//! # Replace an existing archive
//! compressor pack --force -o bundle.zip notes.txt
//! ```
//!
//! The archive is fully built in memory and then moved into place, so a failed
//! run never leaves a truncated `bundle.zip` behind.
//!
use crate::common::archive::{self, FileSet, UploadedFile};
use crate::common::fs::io;
use crate::common::ui;
use crate::core::error::{CompressorError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # Pack Command Arguments (`PackArgs`)
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Files to include, in the order they should appear in the archive.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path of the archive to create.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Overwrite the output file if it already exists.
    #[arg(long, short)]
    pub force: bool,
}

/// # Handle Pack Command (`handle_pack`)
///
/// Reads every input file, builds the archive and writes it to `--output`.
///
/// ## Errors
///
/// Returns an error if an input cannot be read or has no usable file name, if
/// the archive cannot be encoded, or if the output exists and `--force` was
/// not given.
pub async fn handle_pack(args: PackArgs) -> Result<()> {
    info!("Handling pack command with args: {:?}", args);

    let files = collect_files(&args.files)?;
    let archive = archive::build(&files).map_err(|e| {
        if e.is_validation() {
            anyhow::Error::from(CompressorError::ArgumentParsing(e.to_string()))
        } else {
            anyhow::Error::from(e).context("Failed to build archive")
        }
    })?;

    io::write_file_atomic(&args.output, archive.as_bytes(), args.force)?;

    println!(
        "Created {} with {} file(s) ({})",
        args.output.display(),
        archive.entry_count(),
        ui::human_readable_size(archive.len() as u64)
    );
    Ok(())
}

/// Reads `paths` into a `FileSet`, preserving their order.
fn collect_files(paths: &[PathBuf]) -> Result<FileSet> {
    paths
        .iter()
        .map(|path| -> Result<UploadedFile> {
            let name = entry_name(path)?;
            let content = io::read_file_bytes(path)?;
            debug!("Read {} ({} bytes) as '{}'", path.display(), content.len(), name);
            Ok(UploadedFile::new(name, content))
        })
        .collect()
}

/// The archive entry name for a local path: its final component.
fn entry_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CompressorError::ArgumentParsing(format!(
                "Cannot derive an entry name from {:?}",
                path
            ))
            .into()
        })
}
