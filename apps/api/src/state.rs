use std::sync::Arc;

use crate::config::Config;
use crate::glossary::GlossaryStore;
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Glossary persistence. Default: Redis hash, falling back to the built-in list.
    pub glossary: Arc<dyn GlossaryStore>,
    /// Structuring model. Default: `LlmClient`; tests swap in a stub.
    pub llm: Arc<dyn CompletionBackend>,
    pub config: Config,
}
