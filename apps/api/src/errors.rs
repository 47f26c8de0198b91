use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// A single field-level problem found while validating a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Path to the offending field, e.g. `["resumeText"]`. Empty for body-level problems.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        Self {
            path: vec![name.to_string()],
            message: message.into(),
        }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<ValidationIssue>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(ext) => AppError::UnsupportedFormat(format!(
                "Invalid file type{}. Only PDF, DOC, DOCX, and TXT files are allowed.",
                if ext.is_empty() {
                    String::new()
                } else {
                    format!(" '.{ext}'")
                }
            )),
            ExtractionError::ExtractionFailed(msg) => {
                AppError::ExtractionFailed(format!("Failed to process file: {msg}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::UnsupportedFormat(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT", msg.clone())
            }
            AppError::ExtractionFailed(msg) => {
                tracing::error!("File extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_FAILED",
                    msg.clone(),
                )
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "File exceeds the maximum upload size".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = match self {
            AppError::Validation { errors, .. } => Json(json!({
                "code": code,
                "message": message,
                "errors": errors,
            })),
            _ => Json(json!({
                "code": code,
                "message": message,
            })),
        };

        (status, body).into_response()
    }
}
