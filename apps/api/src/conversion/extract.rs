//! PDF text extraction.
//!
//! `pdf-extract` is CPU-bound and can panic on hostile input, so the pipeline
//! calls `extract_pdf_text` through `tokio::task::spawn_blocking`.

use thiserror::Error;

/// Extracted text shorter than this (after trimming) is not a usable resume.
pub const MIN_USABLE_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unable to extract text from PDF: {0}")]
    Unreadable(String),

    #[error("PDF contained too little text ({found} characters, need at least {MIN_USABLE_CHARS})")]
    TooShort { found: usize },
}

/// Extracts plain text from raw PDF bytes.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    ensure_usable(&text)
}

/// Trims extracted text and rejects it when it is too short to convert.
pub fn ensure_usable(text: &str) -> Result<String, ExtractionError> {
    let trimmed = text.trim();
    let found = trimmed.chars().count();
    if found < MIN_USABLE_CHARS {
        return Err(ExtractionError::TooShort { found });
    }
    Ok(trimmed.to_string())
}
