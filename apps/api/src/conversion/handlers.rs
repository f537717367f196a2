//! Axum route handlers for the conversion API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conversion::pipeline::{convert, ConversionError, SourceInput};
use crate::conversion::structuring::StructuringError;
use crate::errors::AppError;
use crate::models::resume::{ContactOverrides, ResumeData};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub contact_overrides: Option<ContactOverrides>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub output: ResumeData,
    pub original_text: String,
}

/// Returned with 200 when the model answered but its output could not be
/// decoded: the raw completion is handed back instead of a resume.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedOutputResponse {
    pub error: String,
    pub diagnostic: String,
    pub output: String,
    pub original_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/convert
///
/// Converts pasted text. Body: `{ "text": "...", "contactOverrides": {...} }`.
pub async fn handle_convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Response, AppError> {
    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InputMissing("Missing \"text\" in body".to_string()))?;

    run_conversion(&state, SourceInput::Text(text), request.contact_overrides).await
}

/// POST /api/convert-pdf
///
/// Multipart upload: `file` (application/pdf) plus optional `name`, `phone`,
/// `email` override fields.
pub async fn handle_convert_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut document: Option<Bytes> = None;
    let mut overrides = ContactOverrides::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if field.content_type() != Some(PDF_CONTENT_TYPE) {
                    return Err(AppError::Validation(
                        "PDF file missing or invalid.".to_string(),
                    ));
                }
                document = Some(field.bytes().await.map_err(multipart_error)?);
            }
            "name" => overrides.name = Some(field.text().await.map_err(multipart_error)?),
            "phone" => overrides.phone = Some(field.text().await.map_err(multipart_error)?),
            "email" => overrides.email = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let document = document
        .ok_or_else(|| AppError::InputMissing("PDF file missing or invalid.".to_string()))?;
    let overrides = (!overrides.is_empty()).then_some(overrides);

    run_conversion(&state, SourceInput::Document(document), overrides).await
}

async fn run_conversion(
    state: &AppState,
    source: SourceInput,
    overrides: Option<ContactOverrides>,
) -> Result<Response, AppError> {
    match convert(source, overrides, state.glossary.as_ref(), state.llm.as_ref()).await {
        Ok(conversion) => Ok(Json(ConvertResponse {
            output: conversion.resume,
            original_text: conversion.original_text,
        })
        .into_response()),
        Err(ConversionError::Structuring {
            source: StructuringError::MalformedResponse { reason, raw },
            original_text,
        }) => {
            warn!("Returning raw model output after parse failure: {reason}");
            Ok(Json(MalformedOutputResponse {
                error: "Failed to parse resume structure".to_string(),
                diagnostic: reason,
                output: raw,
                original_text,
            })
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(e.body_text())
    }
}
