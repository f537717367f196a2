// Conversion pipeline: raw military career text → canonical ResumeData.
// Flow: extract (PDF only) → annotate → structure (one LLM call) → merge overrides.
// All model calls go through llm_client::CompletionBackend.

pub mod extract;
pub mod handlers;
pub mod merge;
pub mod pipeline;
pub mod prompts;
pub mod structuring;
