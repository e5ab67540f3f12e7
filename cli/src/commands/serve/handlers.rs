//! # Compressor HTTP Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! Request handlers for the archive service and the conversion of failures
//! into HTTP responses.
//!
//! - `POST /compress`: multipart upload in, `application/zip` download out.
//! - `GET /health`: liveness probe.
//!
//! ## Error Mapping
//!
//! | Failure                                   | Status | `code`                |
//! |-------------------------------------------|--------|-----------------------|
//! | No `files` parts                          | 400    | `EMPTY_FILE_SET`      |
//! | Part without a usable file name           | 400    | `INVALID_FILE_NAME`   |
//! | Unreadable multipart body or no boundary  | 400    | `MALFORMED_MULTIPART` |
//! | Body larger than `max_body_bytes`         | 413    | `PAYLOAD_TOO_LARGE`   |
//! | Codec failure while encoding              | 500    | `ENCODING_FAILED`     |
//! | Anything else on the server side          | 500    | `INTERNAL_ERROR`      |
//!
//! The archive is fully encoded before the response head is built, so a failed
//! encode never leaks a partial body.
//!
use super::upload::{self, UploadError};
use crate::common::{archive, ui};
use crate::core::error::ArchiveError;
use axum::{
    body::Body,
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Per-service settings the handlers need.
#[derive(Debug, Clone)]
pub struct AppState {
    pub download_name: Arc<str>,
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling.
    pub code: &'static str,
}

/// Failures a handler can return; each maps to one status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Archive(ArchiveError::EmptyFileSet) => {
                (StatusCode::BAD_REQUEST, "EMPTY_FILE_SET")
            }
            ApiError::Archive(ArchiveError::EmptyEntryName { .. })
            | ApiError::Upload(UploadError::MissingFileName { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_FILE_NAME")
            }
            ApiError::Upload(UploadError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_MULTIPART")
            }
            ApiError::Upload(UploadError::TooLarge) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
            }
            ApiError::Archive(ArchiveError::Encoding { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ENCODING_FAILED")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self, code, "Request failed");
        } else {
            warn!(error = %self, code, "Rejected request");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

/// # Compress Upload (`compress`)
///
/// Reads the `files` parts of a multipart request, archives them in
/// submission order, and returns the archive as an attachment.
///
/// Encoding runs on the blocking pool; the request only awaits the result.
#[tracing::instrument(skip_all)]
pub async fn compress(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(UploadError::from)?;
    let files = upload::read_file_set(multipart).await?;
    let file_count = files.len();
    let input_bytes = files.total_content_len();

    let archive = tokio::task::spawn_blocking(move || archive::build(&files))
        .await
        .map_err(|e| ApiError::Internal(format!("Archive task failed: {}", e)))??;

    info!(
        "Archived {} file(s): {} in, {} out",
        file_count,
        ui::human_readable_size(input_bytes),
        ui::human_readable_size(archive.len() as u64)
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, archive::CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.download_name),
        )
        .header(header::CONTENT_LENGTH, archive.len())
        .body(Body::from(archive.into_bytes()))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// # Health Check (`health`)
pub async fn health() -> &'static str {
    "ok"
}
