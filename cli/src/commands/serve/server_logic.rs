//! # Compressor HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! This module implements the HTTP server for the `compressor serve` command:
//! - Router with the `/compress` upload endpoint and `/health`
//! - Port availability checking with automatic fallback
//! - CORS configuration and request tracing
//! - Request body limit enforcement
//! - Graceful shutdown handling
//!
//! ## Architecture
//!
//! The server implementation uses Axum and follows these steps:
//! 1. Find an available port if the requested one is in use
//! 2. Set up the Axum router with appropriate middleware
//! 3. Start the server with graceful shutdown handlers
//! 4. Display connection information
//!
use super::config::ServerConfig;
use super::handlers::{self, AppState};
use super::utils;
use crate::common::ui;
use crate::core::error::Result;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// How many consecutive ports to try before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the service and serves requests until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// This function can return errors if:
/// - An available port cannot be found within the allowed attempts.
/// - Binding the `TcpListener` fails (e.g., permissions).
/// - The Axum server itself encounters a fatal error during operation.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let app = create_app(&config);

    println!("\n=================================================================");
    println!("📦 Archive endpoint:  POST http://localhost:{}/compress", addr.port());
    if utils::is_network_visible(config.host) {
        let local_ip = utils::get_local_ip();
        if local_ip != "localhost" {
            println!("🔗 Network URL:       http://{}:{}/compress", local_ip, addr.port());
        }
    }
    println!("⚙️  Binding to address: {}", addr);
    println!("📄 Download name:     {}", config.download_name);
    println!(
        "📏 Body limit:        {}",
        ui::human_readable_size(config.max_body_bytes as u64)
    );
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting archive service on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Handle Shutdown Signal (`shutdown_signal`)
///
/// Resolves when Ctrl+C or (on Unix) SIGTERM is received. In-flight requests
/// finish; an archive being encoded for an aborted connection is simply dropped.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Starting at `start_port`, tries up to `max_attempts` consecutive ports and
/// returns the first address that can be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Constructs the `Router`: routes, shared state, body limit, tracing and CORS.
pub(crate) fn create_app(config: &ServerConfig) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let state = AppState {
        download_name: config.download_name.as_str().into(),
    };

    Router::new()
        .route("/compress", post(handlers::compress))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}
