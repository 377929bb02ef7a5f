//! Error types for menu loading and the HTTP API.

use std::path::PathBuf;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors raised while loading or validating a menu configuration.
///
/// Permission checks and tree filtering never fail; only configuration
/// loading and payload decoding produce these.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The menu file could not be read.
    #[error("failed to read menu config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML menu config could not be parsed.
    #[error("invalid YAML menu config: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// JSON menu config or user payload could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported menu config format for {path}: expected .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A menu item has an empty key.
    #[error("menu item under '{parent}' has an empty key")]
    EmptyKey { parent: String },

    /// Two siblings share the same key.
    #[error("duplicate menu key '{key}' under '{parent}'")]
    DuplicateKey { parent: String, key: String },

    /// A navigable path does not start with '/'.
    #[error("menu item '{key}' has invalid path '{path}': paths must start with '/'")]
    InvalidPath { key: String, path: String },
}

/// HTTP-facing errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
