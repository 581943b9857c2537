//! Chat route: runs the concierge pipeline for one message.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use concierge_core::{ChatInput, Message, ReplyKind};
use database::{conversation, DatabaseError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::state::AppState;

/// Incoming chat request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_member: bool,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Chat reply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Answer a chat message.
///
/// A provider failure still produces a `reply` (the fallback apology) but
/// with status 500.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatResponse>)> {
    let Json(request) = payload?;
    debug!(
        chars = request.message.len(),
        history = request.conversation_history.len(),
        member = request.is_member,
        "Chat request"
    );

    let mut input = ChatInput::new(request.message.clone())
        .with_membership(request.is_member.into())
        .with_history(request.conversation_history);
    if let Some(name) = request.user_name {
        input = input.with_user_name(name);
    }

    let reply = state.concierge.respond(&input, &state.flags).await;

    match reply.kind {
        ReplyKind::Clarification => {
            let conversation_id = match request.conversation_id {
                Some(id) => known_conversation(&state, id).await,
                None => None,
            };
            Ok((
                StatusCode::OK,
                Json(ChatResponse {
                    reply: reply.text,
                    conversation_id,
                }),
            ))
        }
        ReplyKind::Fallback => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse {
                reply: reply.text,
                conversation_id: None,
            }),
        )),
        ReplyKind::Completion => {
            info!(knowledge = reply.knowledge_count, "Chat reply sent");
            let conversation_id = persist_exchange(
                &state,
                request.conversation_id,
                request.user_id.as_deref(),
                request.message.trim(),
                &reply.text,
            )
            .await;

            Ok((
                StatusCode::OK,
                Json(ChatResponse {
                    reply: reply.text,
                    conversation_id,
                }),
            ))
        }
    }
}

/// Store the user message and reply, returning the conversation they went to.
///
/// An explicit conversation id is appended to; otherwise a conversation is
/// created for a known user id when the flag allows it. Both messages are
/// written in one transaction. Failures are logged and never affect the reply.
async fn persist_exchange(
    state: &AppState,
    conversation_id: Option<String>,
    user_id: Option<&str>,
    user_text: &str,
    reply_text: &str,
) -> Option<String> {
    let pool = state.db.pool();

    let conversation_id = match (conversation_id, user_id) {
        (Some(id), _) => id,
        (None, Some(user_id)) if state.flags.conversation_creation => {
            match conversation::create_conversation(pool, user_id).await {
                Ok(created) => {
                    info!(conversation_id = %created.id, user_id, "Created conversation");
                    created.id
                }
                Err(err) => {
                    warn!(error = %err, "Failed to create conversation");
                    return None;
                }
            }
        }
        _ => return None,
    };

    let now = Utc::now().timestamp_millis();
    match conversation::append_exchange(pool, &conversation_id, user_text, reply_text, now).await {
        Ok(_) => Some(conversation_id),
        Err(DatabaseError::NotFound { .. }) => {
            warn!(conversation_id = %conversation_id, "Unknown conversation, exchange not stored");
            None
        }
        Err(err) => {
            warn!(conversation_id = %conversation_id, error = %err, "Failed to store exchange");
            Some(conversation_id)
        }
    }
}

/// The id back if the conversation exists, `None` otherwise.
async fn known_conversation(state: &AppState, id: String) -> Option<String> {
    match conversation::get_conversation(state.db.pool(), &id).await {
        Ok(_) => Some(id),
        Err(DatabaseError::NotFound { .. }) => None,
        Err(err) => {
            warn!(conversation_id = %id, error = %err, "Failed to look up conversation");
            None
        }
    }
}
