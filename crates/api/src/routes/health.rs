//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    /// Completion provider name.
    pub provider: String,
    /// Whether both the provider and the database can serve requests.
    pub ready: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let provider = state.concierge.provider();
    let ready = provider.is_ready().await && state.db.ping().await;

    Json(Health {
        status: "ok".to_string(),
        provider: provider.name().to_string(),
        ready,
    })
}
