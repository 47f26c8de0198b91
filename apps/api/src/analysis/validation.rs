use serde::Deserialize;

use crate::errors::{AppError, ValidationIssue};

/// Shortest resume text, in characters, worth analysing.
pub const MIN_RESUME_CHARS: usize = 50;

const INVALID_REQUEST: &str = "Invalid request data";

/// Body of `POST /api/analyze-resume` as received. Both fields are optional
/// here so that a missing `resumeText` is reported as a validation issue.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAnalyzeRequest {
    pub resume_text: String,
    /// `None` when absent or blank.
    pub job_description: Option<String>,
}

impl AnalyzeRequest {
    pub fn validate(self) -> Result<ValidAnalyzeRequest, AppError> {
        let resume_text = match self.resume_text {
            Some(text) if text.chars().count() >= MIN_RESUME_CHARS => text,
            Some(_) => {
                return Err(invalid(ValidationIssue::field(
                    "resumeText",
                    format!("Resume text must be at least {MIN_RESUME_CHARS} characters"),
                )))
            }
            None => return Err(invalid(ValidationIssue::field("resumeText", "Required"))),
        };

        Ok(ValidAnalyzeRequest {
            resume_text,
            job_description: self.job_description.filter(|jd| !jd.trim().is_empty()),
        })
    }
}

/// Wraps a body-level problem (malformed JSON, wrong content type) in the same
/// shape as field validation failures.
pub fn invalid_body(message: impl Into<String>) -> AppError {
    invalid(ValidationIssue::body(message))
}

fn invalid(issue: ValidationIssue) -> AppError {
    AppError::Validation {
        message: INVALID_REQUEST.to_string(),
        errors: vec![issue],
    }
}
