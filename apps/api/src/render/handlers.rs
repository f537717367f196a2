//! Axum route handler for document export.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::docx::{render_document, DOCX_CONTENT_TYPE};

/// POST /api/export
///
/// Body: a `ResumeData` JSON object. Responds with the DOCX bytes as an attachment.
pub async fn handle_export(Json(resume): Json<ResumeData>) -> Result<Response, AppError> {
    let rendered = tokio::task::spawn_blocking(move || render_document(&resume))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}"))
        })??;

    info!(
        "Exported {} ({} bytes)",
        rendered.filename,
        rendered.bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    rendered.filename.replace('"', "")
                ),
            ),
        ],
        rendered.bytes,
    )
        .into_response())
}
