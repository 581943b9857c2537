//! Failing provider - always returns an error.

use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage};

/// Which error a [`FailingProvider`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Timeout,
    Network,
    Completion,
}

/// A provider that fails every call.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    failure: Failure,
}

impl Default for FailingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FailingProvider {
    /// Fail with a completion error.
    pub fn new() -> Self {
        Self {
            failure: Failure::Completion,
        }
    }

    /// Fail with a timeout.
    pub fn timeout() -> Self {
        Self {
            failure: Failure::Timeout,
        }
    }

    /// Fail with a network error.
    pub fn network() -> Self {
        Self {
            failure: Failure::Network,
        }
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, ConciergeError> {
        Err(match self.failure {
            Failure::Timeout => ConciergeError::Timeout,
            Failure::Network => ConciergeError::Network("connection refused".to_string()),
            Failure::Completion => ConciergeError::Completion("API error (500): upstream".to_string()),
        })
    }

    fn name(&self) -> &str {
        "FailingProvider"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
