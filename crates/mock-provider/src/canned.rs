//! Canned provider - always returns the same reply.

use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage};

/// A provider that ignores its input and returns a fixed reply.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    reply: String,
}

impl StaticProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for StaticProvider {
    async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "StaticProvider"
    }
}
