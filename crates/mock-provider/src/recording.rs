//! Recording provider - remembers every prompt it was given.

use std::sync::Arc;

use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage};
use tokio::sync::Mutex;

/// Wraps a provider and records the messages of each call.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the code under test.
pub struct RecordingProvider<P: CompletionProvider> {
    inner: Arc<P>,
    calls: Arc<Mutex<Vec<Vec<PromptMessage>>>>,
}

impl<P: CompletionProvider> Clone for RecordingProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<P: CompletionProvider> RecordingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call's messages, in call order.
    pub async fn calls(&self) -> Vec<Vec<PromptMessage>> {
        self.calls.lock().await.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl<P: CompletionProvider> CompletionProvider for RecordingProvider<P> {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        self.calls.lock().await.push(messages.to_vec());
        self.inner.complete(messages).await
    }

    fn name(&self) -> &str {
        "RecordingProvider"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
