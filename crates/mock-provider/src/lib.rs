//! Mock providers and knowledge sources for the concierge pipeline.
//!
//! This crate provides test doubles for the traits in `concierge-core`:
//! - `EchoProvider` - Replies with the last user message
//! - `StaticProvider` - Always returns the same reply
//! - `FailingProvider` - Always fails with a chosen error
//! - `DelayedProvider` - Wraps another provider with artificial delay
//! - `RecordingProvider` - Wraps another provider and keeps every prompt it saw
//! - `StaticKnowledge` / `FailingKnowledge` - Canned knowledge sources
//!
//! For production use, see the `completion-client` crate.
//!
//! # Example
//!
//! ```rust
//! use mock_provider::{CompletionProvider, EchoProvider, PromptMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_provider::ConciergeError> {
//!     let provider = EchoProvider::new();
//!     let reply = provider.complete(&[PromptMessage::user("Hello!")]).await?;
//!     assert_eq!(reply, "Hello!");
//!     Ok(())
//! }
//! ```

mod canned;
mod delayed;
mod echo;
mod failing;
mod knowledge;
mod recording;

// Re-export concierge-core types for convenience
pub use concierge_core::{
    async_trait, CompletionProvider, ConciergeError, KnowledgeItem, KnowledgeKind, KnowledgeQuery,
    KnowledgeSource, PromptMessage,
};

pub use canned::StaticProvider;
pub use delayed::DelayedProvider;
pub use echo::EchoProvider;
pub use failing::FailingProvider;
pub use knowledge::{FailingKnowledge, StaticKnowledge};
pub use recording::RecordingProvider;
