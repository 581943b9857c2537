//! HTTP API for the Gliitz concierge.
//!
//! Serves the chat pipeline plus user, booking, catalog and conversation
//! endpoints over JSON. The binary in `main.rs` wires configuration, the
//! database and the completion provider together; tests build the same
//! router with [`app`] and mock collaborators.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use knowledge::DatabaseKnowledge;
pub use state::AppState;

/// Build the full application with request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
