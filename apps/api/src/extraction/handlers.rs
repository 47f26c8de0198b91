//! Axum route handler for resume file uploads.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::validation::MIN_RESUME_CHARS;
use crate::errors::AppError;
use crate::extraction::extractor::{extract_text, is_supported_filename};
use crate::state::AppState;

/// Multipart form field that carries the file.
pub const UPLOAD_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume_text: String,
    pub file_name: String,
}

struct UploadedFile {
    file_name: String,
    bytes: Bytes,
}

/// POST /api/upload-resume
///
/// Accepts exactly one file in the `resume` field and returns its plain text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Upload is not a multipart form: {}", rejection.body_text());
        AppError::BadRequest("No file uploaded".to_string())
    })?;
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Only one file can be uploaded at a time".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_supported_filename(&file_name) {
            warn!(file_name = %file_name, "Rejected upload with unsupported extension");
            return Err(AppError::UnsupportedFormat(
                "Invalid file type. Only PDF, DOC, DOCX, and TXT files are allowed.".to_string(),
            ));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge);
        }

        upload = Some(UploadedFile { file_name, bytes });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    info!(
        file_name = %upload.file_name,
        size_bytes = upload.bytes.len(),
        "Extracting text from uploaded resume"
    );
    let resume_text = extract_text(upload.bytes, &upload.file_name).await?;

    if resume_text.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::BadRequest(
            "Resume content is too short. Please ensure the file contains meaningful resume content."
                .to_string(),
        ));
    }

    Ok(Json(UploadResponse {
        resume_text,
        file_name: upload.file_name,
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}
