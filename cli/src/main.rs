//! # Compressor Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Compressor application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each top-level command (`serve`, `pack`) is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Run the HTTP service with info-level logging
//! compressor -v serve --port 9000
//!
//! # Bundle local files
//! compressor pack -o bundle.zip a.txt b.txt
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (serve, pack)
mod common; // Shared building blocks (archive, fs, ui)
mod core; // Core infrastructure (errors)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "compressor",
    about = "📦 Compressor: bundle files into a single ZIP archive",
    long_about = "Bundle uploaded or local files into a single ZIP archive.\n\
                  Run an HTTP service (`serve`) or archive files from disk (`pack`).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Run the HTTP archive service.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Bundle local files into a ZIP archive.
    #[command(alias = "p")]
    Pack(commands::pack::PackArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Pack(args) => commands::pack::handle_pack(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
