//! Delayed provider - wraps another provider with artificial delay.

use std::time::Duration;

use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage};
use tokio::time::sleep;

/// A provider that wraps another provider and adds artificial delay.
///
/// Useful for testing timeout handling and simulating model latency.
pub struct DelayedProvider<P: CompletionProvider> {
    inner: P,
    delay: Duration,
}

impl<P: CompletionProvider> DelayedProvider<P> {
    /// Create a new DelayedProvider wrapping the given provider.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a provider with a delay in milliseconds.
    pub fn with_millis(inner: P, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<P: CompletionProvider> CompletionProvider for DelayedProvider<P> {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        sleep(self.delay).await;
        self.inner.complete(messages).await
    }

    fn name(&self) -> &str {
        "DelayedProvider"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoProvider;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_provider() {
        let provider = DelayedProvider::with_millis(EchoProvider::new(), 100);

        let start = Instant::now();
        let reply = provider.complete(&[PromptMessage::user("test")]).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(reply, "test");
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = DelayedProvider::with_millis(EchoProvider::new(), 0);
        assert_eq!(provider.name(), "DelayedProvider");
    }
}
