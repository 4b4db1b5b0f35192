//! Environment-driven runtime settings.

use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime configuration read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub fetch_timeout: Duration,
    pub max_embed_chars: usize,
    pub user_agent: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            fetch_timeout: Duration::from_secs(10),
            max_embed_chars: 4096,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or(&get, "MATCHER_PORT", defaults.port)?,
            fetch_timeout: Duration::from_secs(parse_or(
                &get,
                "MATCHER_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            max_embed_chars: parse_or(&get, "MATCHER_MAX_EMBED_CHARS", defaults.max_embed_chars)?,
            user_agent: get("MATCHER_USER_AGENT").unwrap_or(defaults.user_agent),
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
