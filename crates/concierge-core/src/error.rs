//! Error types for concierge operations.

use thiserror::Error;

/// Errors that can occur while answering a chat message.
#[derive(Debug, Error)]
pub enum ConciergeError {
    /// The request could not be used as given.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The knowledge store failed.
    #[error("knowledge lookup failed: {0}")]
    Knowledge(String),

    /// The completion provider returned an error or an unusable body.
    #[error("completion failed: {0}")]
    Completion(String),

    /// The completion provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The completion provider did not answer in time.
    #[error("completion timed out")]
    Timeout,

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
