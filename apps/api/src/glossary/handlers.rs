//! Axum route handlers for glossary administration.
//! Both endpoints require the `x-admin-password` header.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::glossary::GlossaryEntry;
use crate::state::AppState;

const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    #[serde(default)]
    pub military: String,
    #[serde(default)]
    pub civilian: String,
}

#[derive(Debug, Serialize)]
pub struct GlossaryListResponse {
    pub entries: Vec<GlossaryEntry>,
}

#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub success: bool,
    pub entry: GlossaryEntry,
}

/// GET /api/glossary
///
/// Lists the glossary a conversion would use right now (fallback included).
pub async fn handle_list_glossary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<GlossaryListResponse>, AppError> {
    check_admin_password(&headers, state.config.admin_password.as_deref())?;
    let entries = state.glossary.entries_or_fallback().await;
    Ok(Json(GlossaryListResponse { entries }))
}

/// POST /api/glossary
///
/// Body: `{ "military": "NCOIC", "civilian": "Operations Supervisor" }`.
pub async fn handle_upsert_glossary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpsertRequest>,
) -> Result<Json<UpsertResponse>, AppError> {
    check_admin_password(&headers, state.config.admin_password.as_deref())?;
    let entry = state
        .glossary
        .upsert(&request.military, &request.civilian)
        .await?;
    Ok(Json(UpsertResponse {
        success: true,
        entry,
    }))
}

/// No configured password means nobody is authorized.
fn check_admin_password(headers: &HeaderMap, expected: Option<&str>) -> Result<(), AppError> {
    let supplied = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());
    match (expected, supplied) {
        (Some(expected), Some(supplied)) if expected == supplied => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
