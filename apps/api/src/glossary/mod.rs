// Glossary: military term → civilian definition pairs.
// The store supplies entries once per conversion; the annotator inserts the
// definitions into source text so the structuring model has context.

pub mod annotator;
pub mod handlers;
pub mod store;

use serde::{Deserialize, Serialize};

pub use annotator::annotate;
pub use store::{GlossaryError, GlossaryStore, InMemoryGlossaryStore, RedisGlossaryStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// Normalizes a write: trimmed, lower-cased term (the storage identity) and
    /// trimmed definition. Rejects entries that are blank after trimming.
    pub fn normalized(term: &str, definition: &str) -> Result<Self, GlossaryError> {
        let term = term.trim().to_lowercase();
        let definition = definition.trim().to_string();

        if term.is_empty() {
            return Err(GlossaryError::InvalidEntry(
                "term cannot be empty".to_string(),
            ));
        }
        if definition.is_empty() {
            return Err(GlossaryError::InvalidEntry(
                "definition cannot be empty".to_string(),
            ));
        }

        Ok(Self { term, definition })
    }

    /// An entry is usable by the annotator only when both sides carry text.
    pub fn is_usable(&self) -> bool {
        !self.term.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

/// Built-in glossary used whenever the backing store cannot be read.
pub fn default_glossary() -> Vec<GlossaryEntry> {
    vec![
        GlossaryEntry::new("NCO", "Non-Commissioned Officer (Team Leader)"),
        GlossaryEntry::new("OIC", "Officer in Charge (Project Manager)"),
        GlossaryEntry::new(
            "NCOIC",
            "Non-Commissioned Officer in Charge (Operations Supervisor)",
        ),
        GlossaryEntry::new("MOS", "Military Occupational Specialty (Job Role)"),
        GlossaryEntry::new("CO", "Commanding Officer (Director/VP)"),
        GlossaryEntry::new("XO", "Executive Officer (Chief of Staff)"),
    ]
}

/// Everything the glossary store needs, threaded in explicitly at construction.
#[derive(Debug, Clone)]
pub struct GlossaryConfig {
    /// Redis connection URL. `None` means the store runs on the fallback list only.
    pub redis_url: Option<String>,
    /// Name of the Redis hash holding term → definition fields.
    pub hash_key: String,
    pub fallback: Vec<GlossaryEntry>,
}
