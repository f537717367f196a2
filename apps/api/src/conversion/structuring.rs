//! Structuring — turns annotated text into `ResumeData` with one model call.
//!
//! The raw completion is kept until decoding succeeds: on a decode failure the
//! caller gets both the reason and the unstripped text so it can show a
//! diagnostic instead of failing blind.

use thiserror::Error;
use tracing::{info, warn};

use crate::conversion::prompts::{STRUCTURING_PROMPT_TEMPLATE, STRUCTURING_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::{ANNOTATION_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{CompletionBackend, LlmError};
use crate::models::resume::ResumeData;

#[derive(Debug, Error)]
pub enum StructuringError {
    #[error("Structuring call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Structuring call returned no content")]
    EmptyResponse,

    #[error("Failed to parse resume structure: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

impl StructuringError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StructuringError::Upstream(LlmError::Timeout(_)))
    }
}

/// Sends `annotated_text` to the backend once and decodes the canonical schema.
pub async fn structure(
    backend: &dyn CompletionBackend,
    annotated_text: &str,
) -> Result<ResumeData, StructuringError> {
    let system = build_system_prompt();
    let prompt = STRUCTURING_PROMPT_TEMPLATE.replace("{resume_text}", annotated_text);

    let raw = match backend.complete(&system, &prompt).await {
        Ok(raw) => raw,
        Err(LlmError::EmptyContent) => return Err(StructuringError::EmptyResponse),
        Err(e) => return Err(StructuringError::Upstream(e)),
    };

    if raw.trim().is_empty() {
        return Err(StructuringError::EmptyResponse);
    }

    let resume = decode_resume(&raw)?;
    info!(
        "Structured resume: {} experience items, {} skills, {} education entries",
        resume.experience.len(),
        resume.skills.len(),
        resume.education.len()
    );
    Ok(resume)
}

pub fn build_system_prompt() -> String {
    STRUCTURING_SYSTEM_TEMPLATE
        .replace("{annotation_instruction}", ANNOTATION_INSTRUCTION)
        .replace("{json_only}", JSON_ONLY_SYSTEM)
}

/// Decodes a completion into `ResumeData`, tolerating code fences.
pub fn decode_resume(raw: &str) -> Result<ResumeData, StructuringError> {
    let malformed = |reason: String| {
        warn!(
            "Structuring output rejected ({reason}); raw output was {} bytes",
            raw.len()
        );
        StructuringError::MalformedResponse {
            reason,
            raw: raw.to_string(),
        }
    };

    let mut resume: ResumeData =
        serde_json::from_str(strip_json_fences(raw)).map_err(|e| malformed(e.to_string()))?;

    if let Some(position) = resume
        .experience
        .iter()
        .position(|job| job.achievements.iter().all(|a| a.trim().is_empty()))
    {
        return Err(malformed(format!(
            "experience item {position} has no achievements"
        )));
    }

    resume.dedup_skills();
    Ok(resume)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(|s| s.trim())
                .unwrap_or(stripped)
        }
        None => text.strip_suffix("```").map(|s| s.trim()).unwrap_or(text),
    }
}
