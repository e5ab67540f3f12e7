//! # Compressor HTTP Service Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! This module handles configuration loading, merging, and validation for
//! the archive service. It combines settings from:
//! 1. Command-line arguments (highest priority)
//! 2. Configuration file `.compressor.toml` (if present)
//! 3. Default values (lowest priority)
//!
//! ## Architecture
//!
//! The configuration system follows these steps:
//! 1. Parse command-line arguments
//! 2. Load configuration from file (from `--config DIR`, or the current directory)
//! 3. Merge settings (explicitly set CLI args override file settings)
//! 4. Validate the merged values
//! 5. Create a unified ServerConfig structure
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = false
//! download_name = "bundle.zip"
//! max_body_bytes = 10485760
//! ```
//!
use crate::core::error::{CompressorError, Result};
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The expected name for the service configuration file.
const CONFIG_FILE_NAME: &str = ".compressor.toml";

/// Default upper bound on a request body (64 MiB).
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Defines the command-line arguments accepted by the `compressor serve` command.
/// These arguments override settings from a configuration file or defaults.
///
/// ## Merge rule
///
/// A flag counts as "set" only when its value differs from the built-in default.
/// Passing a default explicitly (e.g. `--port 8000`) is indistinguishable from
/// omitting it, so a value in `.compressor.toml` still wins in that case.
/// `--no-cors` is the exception: when present it always disables CORS.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Sets the network port the server will listen on.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Sets the network IP address the server will bind to.
    /// Use `0.0.0.0` to listen on all interfaces.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Directory containing a `.compressor.toml` file.
    /// Defaults to the current working directory.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// File name suggested to clients for the downloaded archive.
    #[arg(long, default_value = "archive.zip")]
    pub download_name: String,

    /// Largest request body accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// Holds the final, consolidated configuration settings for the service after
/// merging command-line arguments and any settings loaded from `.compressor.toml`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The network port the server will listen on.
    pub port: u16,

    /// The network IP address the server will bind to.
    pub host: IpAddr,

    /// Indicates whether CORS headers should be enabled.
    pub enable_cors: bool,

    /// Value of the `filename` parameter in `Content-Disposition`.
    pub download_name: String,

    /// Request body limit enforced by the transport.
    pub max_body_bytes: usize,
}

/// # Configuration from File (`FileConfig`)
///
/// Helper struct used solely for deserializing `.compressor.toml`.
/// All fields are optional so users only specify the settings they wish to change.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    host: Option<String>, // Read as string to handle parsing errors gracefully
    enable_cors: Option<bool>,
    download_name: Option<String>,
    max_body_bytes: Option<usize>,
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Starts from the command-line arguments, overrides them with settings from a
/// `.compressor.toml` file where the user did not set the flag explicitly, and
/// validates the result.
///
/// ## Errors
///
/// Returns an error if:
/// - The current working directory cannot be determined.
/// - The configuration file exists but cannot be read or parsed.
/// - The merged configuration fails validation (see `ServerConfig::validate`).
pub async fn load_and_merge_config(args: ServeArgs) -> Result<ServerConfig> {
    let mut effective_config = ServerConfig::from_args(&args);
    let cli_defaults = ServeArgs::parse_from([""]); // Get defaults for comparison

    let config_search_dir = match &args.config {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir),
        None => env::current_dir().context("Failed to get current working directory")?,
    };

    debug!(
        "Looking for config file in: {}",
        config_search_dir.display()
    );

    if let Some(file_config) = load_config_from_dir(&config_search_dir)? {
        info!(
            "Loaded settings from {}",
            config_search_dir.join(CONFIG_FILE_NAME).display()
        );

        if args.port == cli_defaults.port {
            effective_config.port = file_config.port;
        }
        if args.host == cli_defaults.host {
            effective_config.host = file_config.host;
        }
        // CORS: Use file's value only if --no-cors flag was *not* used.
        if !args.no_cors {
            effective_config.enable_cors = file_config.enable_cors;
        }
        if args.download_name == cli_defaults.download_name {
            effective_config.download_name = file_config.download_name;
        }
        if args.max_body_bytes == cli_defaults.max_body_bytes {
            effective_config.max_body_bytes = file_config.max_body_bytes;
        }
    } else if args.config.is_some() {
        // An explicit --config pointing at a directory without a file is worth flagging.
        warn!(
            "No {} found in {}; using arguments and defaults.",
            CONFIG_FILE_NAME,
            config_search_dir.display()
        );
    } else {
        debug!("No config file found or loaded. Using arguments.");
    }

    effective_config.validate()?;
    Ok(effective_config)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            enable_cors: true,
            download_name: "archive.zip".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// # Load Configuration from Directory (`load_config_from_dir`)
///
/// Attempts to find, read, and parse `.compressor.toml` within `search_dir`.
///
/// ## Returns
///
/// * `Ok(Some(config))` if the file was found and parsed successfully.
/// * `Ok(None)` if the file was not found.
/// * `Err(_)` if the file was found but could not be read or parsed.
fn load_config_from_dir(search_dir: &Path) -> Result<Option<ServerConfig>> {
    let config_path = search_dir.join(CONFIG_FILE_NAME);

    if !config_path.is_file() {
        debug!("No config file found at {}", config_path.display());
        return Ok(None);
    }

    info!("Loading configuration from {}", config_path.display());

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let file_config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    let defaults = ServerConfig::default();

    // Parse the host IP address string, falling back to default if invalid.
    let host_ip = match file_config.host {
        Some(ref host_str) => host_str.parse().unwrap_or_else(|e| {
            warn!(
                "Invalid host IP '{}' in config file ({}), using default {}",
                host_str, e, defaults.host
            );
            defaults.host
        }),
        None => defaults.host,
    };

    Ok(Some(ServerConfig {
        port: file_config.port.unwrap_or(defaults.port),
        host: host_ip,
        enable_cors: file_config.enable_cors.unwrap_or(defaults.enable_cors),
        download_name: file_config.download_name.unwrap_or(defaults.download_name),
        max_body_bytes: file_config.max_body_bytes.unwrap_or(defaults.max_body_bytes),
    }))
}

impl ServerConfig {
    /// Creates an initial `ServerConfig` from the command-line arguments alone.
    /// `enable_cors` is derived by inverting the `no_cors` flag.
    fn from_args(args: &ServeArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            enable_cors: !args.no_cors,
            download_name: args.download_name.clone(),
            max_body_bytes: args.max_body_bytes,
        }
    }

    /// # Validate Configuration (`validate`)
    ///
    /// The download name ends up inside a quoted header parameter, so it must be
    /// a bare file name without quotes, separators or control characters.
    /// The body limit must allow at least one byte.
    fn validate(&self) -> Result<()> {
        let name = &self.download_name;
        if name.is_empty()
            || name == "."
            || name == ".."
            || name
                .chars()
                .any(|c| c == '"' || c == '/' || c == '\\' || c.is_control())
        {
            anyhow::bail!(CompressorError::Config(format!(
                "Invalid download_name '{}': expected a plain file name",
                name
            )));
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!(CompressorError::Config(
                "max_body_bytes must be greater than zero".to_string()
            ));
        }
        Ok(())
    }
}
