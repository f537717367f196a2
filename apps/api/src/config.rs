use std::time::Duration;

use anyhow::{Context, Result};

use crate::glossary::{default_glossary, GlossaryConfig};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Unset → glossary runs on the built-in list and writes are rejected.
    pub redis_url: Option<String>,
    pub glossary_key: String,
    /// Unset → every glossary admin call is unauthorized.
    pub admin_password: Option<String>,
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            redis_url: optional_env("REDIS_URL"),
            glossary_key: optional_env("GLOSSARY_KEY").unwrap_or_else(|| "glossary".to_string()),
            admin_password: optional_env("ADMIN_PASSWORD"),
            llm_timeout: Duration::from_secs(
                parse_env("LLM_TIMEOUT_SECS", 60).context("LLM_TIMEOUT_SECS must be a number")?,
            ),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a number")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn glossary_config(&self) -> GlossaryConfig {
        GlossaryConfig {
            redis_url: self.redis_url.clone(),
            hash_key: self.glossary_key.clone(),
            fallback: default_glossary(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Missing and blank values are both treated as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => Ok(raw.parse::<T>()?),
        None => Ok(default),
    }
}
