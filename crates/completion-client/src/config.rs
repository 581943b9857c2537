//! Configuration for the OpenAI-compatible provider.

use concierge_core::ConciergeError;
use std::env;
use std::time::Duration;

/// Configuration for [`crate::OpenAiProvider`].
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API base URL (without `/v1/...`).
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Request timeout. A slower provider counts as failed.
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: Some(800),
            temperature: Some(0.7),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CompletionConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: 800)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `OPENAI_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConciergeError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConciergeError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("OPENAI_API_URL").unwrap_or(defaults.api_url);

        let model = env::var("OPENAI_MODEL").unwrap_or(defaults.model);

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let timeout = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CompletionConfigBuilder {
        CompletionConfigBuilder::default()
    }

    /// Full chat-completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for CompletionConfig.
#[derive(Debug, Default)]
pub struct CompletionConfigBuilder {
    config: CompletionConfig,
}

impl CompletionConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CompletionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompletionConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(800));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_all_options() {
        let config = CompletionConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com/")
            .model("gpt-4o")
            .max_tokens(512)
            .temperature(0.5)
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.completions_url(),
            "https://custom.api.com/v1/chat/completions"
        );
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_openai_vars() {
            for var in [
                "OPENAI_API_KEY",
                "OPENAI_API_URL",
                "OPENAI_MODEL",
                "OPENAI_MAX_TOKENS",
                "OPENAI_TEMPERATURE",
                "OPENAI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        // Missing API key should error
        clear_all_openai_vars();
        match CompletionConfig::from_env() {
            Err(ConciergeError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        std::env::set_var("OPENAI_API_KEY", "test-env-key");
        let config = CompletionConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(30));

        // All vars set
        std::env::set_var("OPENAI_API_URL", "http://localhost:11434");
        std::env::set_var("OPENAI_MODEL", "llama3");
        std::env::set_var("OPENAI_MAX_TOKENS", "256");
        std::env::set_var("OPENAI_TEMPERATURE", "0.2");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "3");
        let config = CompletionConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout, Duration::from_secs(3));

        // Unparsable numbers fall back to defaults
        std::env::set_var("OPENAI_MAX_TOKENS", "lots");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "soon");
        let config = CompletionConfig::from_env().unwrap();
        assert_eq!(config.max_tokens, Some(800));
        assert_eq!(config.timeout, Duration::from_secs(30));

        clear_all_openai_vars();
    }
}
