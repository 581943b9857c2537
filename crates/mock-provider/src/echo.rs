//! Echo provider - replies with the last user message.

use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage, PromptRole};

/// A provider that echoes the most recent user message back.
///
/// Useful for testing the request flow without a language model.
#[derive(Debug, Clone, Default)]
pub struct EchoProvider {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoProvider {
    /// Create a new EchoProvider with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoProvider with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_provider::EchoProvider;
    ///
    /// let provider = EchoProvider::with_prefix("Echo: ");
    /// // Will respond with "Echo: <last user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == PromptRole::User)
            .map(|m| m.content.as_str())
            .ok_or_else(|| ConciergeError::InvalidInput("no user message".to_string()))?;

        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last_user),
            None => last_user.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoProvider"
    }
}
