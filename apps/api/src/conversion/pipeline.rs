//! Conversion pipeline — orchestrates one conversion run.
//!
//! Flow: resolve source text (PDF extraction if needed) → load glossary
//!       (fallback on failure) → annotate → structure → merge overrides.
//!
//! Every stage except `structure` is deterministic. Failures after the source
//! text is known carry that text so callers can still show the "before" view.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::conversion::extract::{extract_pdf_text, ExtractionError};
use crate::conversion::merge::merge_overrides;
use crate::conversion::structuring::{structure, StructuringError};
use crate::glossary::{annotate, GlossaryStore};
use crate::llm_client::CompletionBackend;
use crate::models::resume::{ContactOverrides, ResumeData};

/// Where the military career text comes from.
#[derive(Debug, Clone)]
pub enum SourceInput {
    Text(String),
    Document(Bytes),
}

/// A successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub resume: ResumeData,
    pub original_text: String,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("No resume text or document provided")]
    InputMissing,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("{source}")]
    Structuring {
        #[source]
        source: StructuringError,
        original_text: String,
    },
}

/// Runs the full pipeline for one request.
pub async fn convert(
    source: SourceInput,
    overrides: Option<ContactOverrides>,
    glossary: &dyn GlossaryStore,
    backend: &dyn CompletionBackend,
) -> Result<Conversion, ConversionError> {
    let original_text = resolve_text(source).await?;

    let entries = glossary.entries_or_fallback().await;
    let annotated = annotate(&original_text, &entries);
    debug!(
        "Annotated source with {} glossary entries ({} → {} bytes)",
        entries.len(),
        original_text.len(),
        annotated.len()
    );

    let structured = match structure(backend, &annotated).await {
        Ok(structured) => structured,
        Err(source) => {
            return Err(ConversionError::Structuring {
                source,
                original_text,
            })
        }
    };

    let resume = merge_overrides(structured, overrides);
    info!(
        "Conversion complete: {} experience items",
        resume.experience.len()
    );

    Ok(Conversion {
        resume,
        original_text,
    })
}

async fn resolve_text(source: SourceInput) -> Result<String, ConversionError> {
    match source {
        SourceInput::Text(text) => {
            if text.trim().is_empty() {
                return Err(ConversionError::InputMissing);
            }
            Ok(text)
        }
        SourceInput::Document(bytes) => {
            if bytes.is_empty() {
                return Err(ConversionError::InputMissing);
            }
            let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| ExtractionError::Unreadable(format!("extraction task failed: {e}")))??;
            info!("Extracted {} characters from PDF", text.chars().count());
            Ok(text)
        }
    }
}
