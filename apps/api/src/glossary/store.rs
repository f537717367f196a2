//! Glossary persistence.
//!
//! `GlossaryStore` is the seam between the conversion pipeline and wherever
//! term definitions live. Production uses a Redis hash; tests and Redis-less
//! deployments use `InMemoryGlossaryStore`. Reads are allowed to fail: callers
//! go through `entries_or_fallback`, which never errors.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{debug, warn};

use crate::glossary::{GlossaryConfig, GlossaryEntry};

/// Upper bound on a glossary read before the fallback list takes its place.
const READ_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("Glossary store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid glossary entry: {0}")]
    InvalidEntry(String),
}

impl From<redis::RedisError> for GlossaryError {
    fn from(e: redis::RedisError) -> Self {
        GlossaryError::StoreUnavailable(e.to_string())
    }
}

#[async_trait]
pub trait GlossaryStore: Send + Sync {
    /// Reads every stored entry, in a stable order.
    async fn list(&self) -> Result<Vec<GlossaryEntry>, GlossaryError>;

    /// Writes one entry. Same (normalized) term overwrites its prior definition.
    async fn upsert(&self, term: &str, definition: &str) -> Result<GlossaryEntry, GlossaryError>;

    /// The list substituted when `list` fails.
    fn fallback(&self) -> &[GlossaryEntry];

    /// Reads the glossary for one conversion run. A failed or slow read is
    /// absorbed and replaced by the fallback list. Unusable entries are dropped.
    async fn entries_or_fallback(&self) -> Vec<GlossaryEntry> {
        let entries = match tokio::time::timeout(READ_TIMEOUT, self.list()).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                warn!("{e}; using built-in glossary");
                self.fallback().to_vec()
            }
            Err(_) => {
                warn!(
                    "Glossary read exceeded {}s; using built-in glossary",
                    READ_TIMEOUT.as_secs()
                );
                self.fallback().to_vec()
            }
        };
        usable_entries(entries)
    }
}

/// Drops blank entries and later duplicates of an already-seen term.
pub fn usable_entries(entries: Vec<GlossaryEntry>) -> Vec<GlossaryEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(GlossaryEntry::is_usable)
        .filter(|e| seen.insert(e.term.trim().to_lowercase()))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Glossary backed by a single Redis hash (field = lower-cased term).
///
/// Built without a URL (or with an unparsable one) it still constructs; every
/// read then reports `StoreUnavailable` and the caller falls back.
pub struct RedisGlossaryStore {
    client: Option<redis::Client>,
    hash_key: String,
    fallback: Vec<GlossaryEntry>,
}

impl RedisGlossaryStore {
    pub fn new(config: GlossaryConfig) -> Self {
        let client = match config.redis_url.as_deref() {
            Some(url) => match redis::Client::open(url) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Invalid REDIS_URL, glossary will use the built-in list: {e}");
                    None
                }
            },
            None => None,
        };

        Self {
            client,
            hash_key: config.hash_key,
            fallback: config.fallback,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, GlossaryError> {
        let client = self.client.as_ref().ok_or_else(|| {
            GlossaryError::StoreUnavailable("no glossary store configured".to_string())
        })?;
        Ok(client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl GlossaryStore for RedisGlossaryStore {
    async fn list(&self) -> Result<Vec<GlossaryEntry>, GlossaryError> {
        let mut conn = self.connection().await?;
        let fields: HashMap<String, String> = conn.hgetall(&self.hash_key).await?;

        // Hash iteration order is arbitrary; sort so every run sees the same list.
        let mut entries: Vec<GlossaryEntry> = fields
            .into_iter()
            .map(|(term, definition)| GlossaryEntry { term, definition })
            .collect();
        entries.sort_by(|a, b| a.term.cmp(&b.term));

        debug!("Loaded {} glossary entries from Redis", entries.len());
        Ok(entries)
    }

    async fn upsert(&self, term: &str, definition: &str) -> Result<GlossaryEntry, GlossaryError> {
        let entry = GlossaryEntry::normalized(term, definition)?;
        let mut conn = self.connection().await?;
        let _: () = conn
            .hset(&self.hash_key, &entry.term, &entry.definition)
            .await?;
        debug!("Upserted glossary term '{}'", entry.term);
        Ok(entry)
    }

    fn fallback(&self) -> &[GlossaryEntry] {
        &self.fallback
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local glossary. Last writer wins per term.
pub struct InMemoryGlossaryStore {
    entries: RwLock<BTreeMap<String, String>>,
    fallback: Vec<GlossaryEntry>,
}

impl InMemoryGlossaryStore {
    pub fn new(fallback: Vec<GlossaryEntry>) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            fallback,
        }
    }

    /// Starts with `initial` already stored (normalized; unusable entries are
    /// skipped). `initial` also serves as the fallback list.
    pub fn seeded(initial: Vec<GlossaryEntry>) -> Self {
        let entries = initial
            .iter()
            .filter_map(|e| GlossaryEntry::normalized(&e.term, &e.definition).ok())
            .map(|e| (e.term, e.definition))
            .collect();
        Self {
            entries: RwLock::new(entries),
            fallback: initial,
        }
    }
}

#[async_trait]
impl GlossaryStore for InMemoryGlossaryStore {
    async fn list(&self) -> Result<Vec<GlossaryEntry>, GlossaryError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| GlossaryError::StoreUnavailable("glossary lock poisoned".to_string()))?;
        Ok(entries
            .iter()
            .map(|(term, definition)| GlossaryEntry::new(term.clone(), definition.clone()))
            .collect())
    }

    async fn upsert(&self, term: &str, definition: &str) -> Result<GlossaryEntry, GlossaryError> {
        let entry = GlossaryEntry::normalized(term, definition)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| GlossaryError::StoreUnavailable("glossary lock poisoned".to_string()))?;
        entries.insert(entry.term.clone(), entry.definition.clone());
        Ok(entry)
    }

    fn fallback(&self) -> &[GlossaryEntry] {
        &self.fallback
    }
}
