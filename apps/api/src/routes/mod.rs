pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::conversion::handlers::{handle_convert, handle_convert_pdf};
use crate::glossary::handlers::{handle_list_glossary, handle_upsert_glossary};
use crate::render::handlers::handle_export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/convert", post(handle_convert))
        .route("/api/convert-pdf", post(handle_convert_pdf))
        .route("/api/export", post(handle_export))
        .route(
            "/api/glossary",
            get(handle_list_glossary).post(handle_upsert_glossary),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
