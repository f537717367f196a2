use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::conversion::extract::ExtractionError;
use crate::conversion::pipeline::ConversionError;
use crate::conversion::structuring::StructuringError;
use crate::glossary::GlossaryError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Conversion failures that happen after the source text is known keep it in
/// `original_text`; the response echoes it back as `originalText`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input missing: {0}")]
    InputMissing(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Invalid glossary entry: {0}")]
    InvalidEntry(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        original_text: Option<String>,
    },

    #[error("Upstream timed out")]
    UpstreamTimeout { original_text: Option<String> },

    #[error("Upstream returned no content")]
    EmptyResponse { original_text: Option<String> },

    #[error("Glossary store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GlossaryError> for AppError {
    fn from(e: GlossaryError) -> Self {
        match e {
            GlossaryError::InvalidEntry(msg) => AppError::InvalidEntry(msg),
            GlossaryError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        AppError::ExtractionFailed(e.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Internal(anyhow::anyhow!(e))
    }
}

impl From<ConversionError> for AppError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::InputMissing => {
                AppError::InputMissing("No resume text or document provided".to_string())
            }
            ConversionError::Extraction(e) => e.into(),
            ConversionError::Structuring {
                source,
                original_text,
            } => {
                let original_text = Some(original_text);
                match source {
                    StructuringError::EmptyResponse => AppError::EmptyResponse { original_text },
                    ref upstream if upstream.is_timeout() => {
                        AppError::UpstreamTimeout { original_text }
                    }
                    other => AppError::Upstream {
                        message: other.to_string(),
                        original_text,
                    },
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, original_text) = match self {
            AppError::InputMissing(msg) => (StatusCode::BAD_REQUEST, "INPUT_MISSING", msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::ExtractionFailed(msg) => {
                (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED", msg, None)
            }
            AppError::InvalidEntry(msg) => (StatusCode::BAD_REQUEST, "INVALID_ENTRY", msg, None),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
                None,
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Uploaded document exceeds the size limit".to_string(),
                None,
            ),
            AppError::Upstream {
                message,
                original_text,
            } => {
                tracing::error!("Upstream error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "The resume structuring service failed".to_string(),
                    original_text,
                )
            }
            AppError::UpstreamTimeout { original_text } => {
                tracing::error!("Upstream structuring call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "UPSTREAM_TIMEOUT",
                    "The resume structuring service timed out".to_string(),
                    original_text,
                )
            }
            AppError::EmptyResponse { original_text } => {
                tracing::error!("Upstream structuring call returned no content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMPTY_RESPONSE",
                    "The resume structuring service returned no content".to_string(),
                    original_text,
                )
            }
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Glossary store unavailable: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_UNAVAILABLE",
                    "The glossary store is unavailable".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(text) = original_text {
            body["originalText"] = json!(text);
        }

        (status, Json(body)).into_response()
    }
}
