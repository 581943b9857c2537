//! Core trait and types for the Gliitz concierge.
//!
//! This crate holds everything the chat flow needs that is not tied to a
//! particular transport or store:
//!
//! - [`ContextBuilder`] - Turns a chat request into a [`Prompt`]
//! - [`Intent`] - Naive keyword intent extraction (category, zone, date)
//! - [`KnowledgeSource`] - Trait for looking up establishments, events and services
//! - [`CompletionProvider`] - Trait for language-model backends
//! - [`Concierge`] - The linear pipeline tying the pieces together
//! - [`FeatureFlags`] - Explicit behavior overrides passed through the call chain
//!
//! # Example
//!
//! ```rust
//! use concierge_core::{async_trait, CompletionProvider, ConciergeError, PromptMessage};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionProvider for Canned {
//!     async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, ConciergeError> {
//!         Ok("Bienvenue à Marbella !".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Canned"
//!     }
//! }
//! ```

mod context;
mod error;
mod flags;
mod intent;
mod knowledge;
mod message;
mod pipeline;
mod prompt;
mod provider;

pub use context::{ContextBuilder, ContextOutcome, DEFAULT_HISTORY_WINDOW};
pub use error::ConciergeError;
pub use flags::FeatureFlags;
pub use intent::{Category, DateRange, Intent, Zone};
pub use knowledge::{KnowledgeItem, KnowledgeKind, KnowledgeQuery, KnowledgeSource, MAX_KNOWLEDGE_ITEMS};
pub use message::{ChatInput, Membership, Message, Role};
pub use pipeline::{Concierge, Reply, ReplyKind};
pub use prompt::{
    hash_prompt, Prompt, PromptMessage, PromptRole, CLARIFICATION_REPLY, DEFAULT_SYSTEM_PROMPT,
    FALLBACK_REPLY,
};
pub use provider::CompletionProvider;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
