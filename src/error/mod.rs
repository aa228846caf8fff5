// Error types for basic-api
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status and machine-readable error type for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ServiceError::Config(_) | ServiceError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            ServiceError::Database(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_error"),
            ServiceError::Io(_) | ServiceError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

/// Uniform JSON error envelope shared by handlers and the recovery stage.
pub fn error_body(error_type: &str, message: &str) -> serde_json::Value {
    json!({
        "type": "error",
        "error": {
            "type": error_type,
            "message": message,
        }
    })
}

// Convert ServiceError to HTTP responses for Axum
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.classify();
        // Database details stay in the logs
        let message = match &self {
            ServiceError::Database(_) => "database unavailable".to_string(),
            other => other.to_string(),
        };

        (status, axum::Json(error_body(error_type, &message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
