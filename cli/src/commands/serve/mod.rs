//! # Compressor Archive Service
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! This module provides the HTTP front end of the archiver. Clients upload
//! files as `multipart/form-data` (field name `files`) to `POST /compress` and
//! receive a single ZIP archive back. Configurable options:
//! - Port binding (with automatic fallback if the port is in use)
//! - Host interface binding
//! - CORS (Cross-Origin Resource Sharing)
//! - Suggested download file name
//! - Request body size limit
//!
//! ## Architecture
//!
//! The module is organized into these components:
//! - `config.rs`: Configuration loading and validation
//! - `server_logic.rs`: Router construction and the server loop
//! - `handlers.rs`: Request handlers and HTTP error mapping
//! - `upload.rs`: Multipart body to `FileSet` conversion
//! - `utils.rs`: Banner and logging helpers
//!
//! ## Examples
//!
//! ```bash
//! # Start the service on the default port
//! compressor serve
//!
//! # Listen on all interfaces, port 9000
//! compressor serve --port 9000 --host 0.0.0.0
//!
//! # Request an archive
//! curl -F files=@foo.txt -F files=@bar.txt http://localhost:8000/compress -o out.zip
//! ```
//!
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

/// Handles configuration loading and merging for the service.
pub mod config;

/// Request handlers and error responses.
pub mod handlers;

/// Contains the Axum router and server loop.
pub mod server_logic;

/// Multipart upload decoding.
pub mod upload;

/// Provides utility functions for the startup banner and logging.
pub mod utils;

/// # Handle Serve Command (`handle_serve`)
///
/// Entry point for `compressor serve`: loads the effective configuration and
/// runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config).await?;

    Ok(())
}
