//! Gliitz concierge API server.

use std::sync::Arc;

use api::{app, AppState, Config, DatabaseKnowledge};
use completion_client::OpenAiProvider;
use concierge_core::{hash_prompt, CompletionProvider, Concierge, ContextBuilder};
use database::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        history_window = config.history_window,
        knowledge_lookup = config.flags.knowledge_lookup,
        conversation_creation = config.flags.conversation_creation,
        "Starting Gliitz API"
    );

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let provider = OpenAiProvider::from_env()?;
    info!(
        provider = provider.name(),
        model = %provider.config().model,
        "Completion provider configured"
    );

    info!(
        prompt_sha256 = %hash_prompt(&config.system_prompt),
        chars = config.system_prompt.len(),
        "System prompt loaded"
    );

    let concierge = Concierge::new(
        ContextBuilder::new(config.system_prompt.clone(), config.history_window),
        Arc::new(DatabaseKnowledge::new(db.clone())),
        Arc::new(provider),
    );

    let state = AppState::new(db, concierge, config.flags);

    info!(addr = %config.addr, "Gliitz API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
