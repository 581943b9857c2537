//! The CompletionProvider trait definition.

use async_trait::async_trait;

use crate::error::ConciergeError;
use crate::prompt::PromptMessage;

/// A language-model backend producing one completion per call.
///
/// Implementations make a single attempt; retries are not expected.
/// This trait is object-safe and can be used with `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce a completion for the given messages.
    ///
    /// # Returns
    ///
    /// The completion text, or an error if the provider failed, timed out,
    /// or returned no content.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;

    /// Check if the provider is ready to serve requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
