//! OpenAI-compatible completion provider.
//!
//! This crate implements [`concierge_core::CompletionProvider`] over the
//! chat-completions HTTP API. Any compatible endpoint works (OpenAI, a local
//! gateway, a proxy) by setting `OPENAI_API_URL`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use completion_client::OpenAiProvider;
//! use concierge_core::{CompletionProvider, PromptMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiProvider::from_env()?;
//!     let reply = provider
//!         .complete(&[PromptMessage::user("Un restaurant japonais à Marbella ?")])
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod provider;

pub use config::{CompletionConfig, CompletionConfigBuilder};
pub use provider::OpenAiProvider;
