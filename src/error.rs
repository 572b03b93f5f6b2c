//! Error types shared by the storage backends and the HTTP layer.
//!
//! Backends report [`StoreError`]; services translate those into [`ApiError`],
//! which knows how to render itself as a JSON response.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned by a panicked request")]
    Poisoned,
}

/// Failures surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("file size {size} exceeds the {limit} byte limit")]
    PayloadTooLarge { size: i64, limit: i64 },

    #[error("{0}")]
    NotFound(String),

    #[error("database not configured: {0}")]
    Configuration(String),

    /// `expose` echoes the detail back to the client; otherwise it is only logged.
    #[error("persistence failure: {detail}")]
    Persistence { detail: String, expose: bool },

    #[error("database call exceeded {0} ms")]
    Timeout(u64),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::PayloadTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Configuration(_) | ApiError::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(message) | ApiError::NotFound(message) => {
                json!({ "error": message })
            }
            ApiError::PayloadTooLarge { .. } => {
                json!({ "error": "File too large. Maximum size is 5MB." })
            }
            ApiError::Configuration(details) => {
                error!("Configuration error: {}", details);
                json!({ "error": "Database not configured", "details": details })
            }
            ApiError::Persistence { detail, expose } => {
                error!("Persistence error: {}", detail);
                if *expose {
                    json!({ "error": "Internal server error", "details": detail })
                } else {
                    json!({ "error": "Internal server error" })
                }
            }
            ApiError::Timeout(ms) => {
                error!("Database call timed out after {} ms", ms);
                json!({ "error": "Database request timed out" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
