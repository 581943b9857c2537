//! OpenAiProvider implementation using the chat-completions API.

use concierge_core::{async_trait, hash_prompt, CompletionProvider, ConciergeError, PromptMessage};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::CompletionConfig;

/// A completion provider speaking the OpenAI chat-completions protocol.
///
/// Works with any compatible endpoint. Each call is a single attempt bounded
/// by the configured timeout.
pub struct OpenAiProvider {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration.
    pub fn new(config: CompletionConfig) -> Result<Self, ConciergeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConciergeError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenAiProvider initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables.
    ///
    /// See [`CompletionConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ConciergeError> {
        Self::new(CompletionConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    fn build_request(&self, messages: &[PromptMessage]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse, ConciergeError> {
        let url = self.config.completions_url();

        if let Some(system) = request.messages.first().filter(|m| m.role == "system") {
            debug!(fingerprint = %hash_prompt(&system.content), "Sending completion request");
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ConciergeError::Timeout
                } else {
                    ConciergeError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(ConciergeError::Completion(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(ConciergeError::Completion(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            if e.is_timeout() {
                ConciergeError::Timeout
            } else {
                ConciergeError::Completion(format!("Failed to parse response: {}", e))
            }
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        let request = self.build_request(messages);
        let completion = self.chat_completion(&request).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty());

        match text {
            Some(text) => Ok(text),
            None => {
                warn!(model = %self.config.model, "No content in completion response");
                Err(ConciergeError::Completion("empty completion".to_string()))
            }
        }
    }

    fn name(&self) -> &str {
        "OpenAiProvider"
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}
