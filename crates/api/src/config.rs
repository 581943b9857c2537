//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::Path;

use concierge_core::{FeatureFlags, DEFAULT_HISTORY_WINDOW, DEFAULT_SYSTEM_PROMPT};

/// Default file the system prompt is read from.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// API server configuration.
///
/// The completion provider reads its own `OPENAI_*` variables; see
/// `completion_client::CompletionConfig`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Number of prior messages kept in each prompt.
    pub history_window: usize,
    /// Concierge persona.
    pub system_prompt: String,
    /// Behavior overrides.
    pub flags: FeatureFlags,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GLIITZ_API_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:gliitz.db?mode=rwc` |
    /// | `GLIITZ_HISTORY_WINDOW` | Prior messages per prompt | `10` |
    /// | `GLIITZ_SYSTEM_PROMPT` | Persona text (overrides the file) | |
    /// | `GLIITZ_PROMPT_FILE` | Persona file | `SYSTEM_PROMPT.md` |
    /// | `GLIITZ_KNOWLEDGE_LOOKUP` | Enable catalog lookup | `true` |
    /// | `GLIITZ_CONVERSATION_CREATION` | Create conversations for known users | `true` |
    ///
    /// With neither prompt variable nor a readable file, the built-in persona is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("GLIITZ_API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:gliitz.db?mode=rwc".to_string());

        let history_window = match env::var("GLIITZ_HISTORY_WINDOW") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHistoryWindow(value))?,
            Err(_) => DEFAULT_HISTORY_WINDOW,
        };

        // Env var takes precedence, then the prompt file, then the built-in persona
        let system_prompt = match env::var("GLIITZ_SYSTEM_PROMPT") {
            Ok(prompt) if !prompt.trim().is_empty() => prompt.trim().to_string(),
            _ => {
                let prompt_file = env::var("GLIITZ_PROMPT_FILE")
                    .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
                load_prompt_file(&prompt_file).unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
            }
        };

        let flags = FeatureFlags {
            knowledge_lookup: env_flag("GLIITZ_KNOWLEDGE_LOOKUP", true),
            conversation_creation: env_flag("GLIITZ_CONVERSATION_CREATION", true),
        };

        Ok(Self {
            addr,
            database_url,
            history_window,
            system_prompt,
            flags,
        })
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(default)
}

/// Load a prompt file, returning None if not found or empty.
pub fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GLIITZ_API_ADDR format")]
    InvalidAddr,

    #[error("Invalid GLIITZ_HISTORY_WINDOW: {0}")]
    InvalidHistoryWindow(String),
}
