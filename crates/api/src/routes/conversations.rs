//! Conversation routes.

use axum::extract::{Path, State};
use axum::Json;
use database::{conversation, Conversation, StoredMessage};
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageList {
    pub success: bool,
    pub messages: Vec<StoredMessage>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ConversationList {
    pub success: bool,
    pub conversations: Vec<Conversation>,
    pub count: usize,
}

/// List a user's conversations, newest first.
///
/// An unknown user yields an empty list.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ConversationList>> {
    let conversations = conversation::list_conversations_for_user(state.db.pool(), &user_id).await?;
    Ok(Json(ConversationList {
        success: true,
        count: conversations.len(),
        conversations,
    }))
}

/// List a conversation's messages in time order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageList>> {
    let messages = conversation::list_messages(state.db.pool(), &id).await?;
    Ok(Json(MessageList {
        success: true,
        count: messages.len(),
        messages,
    }))
}
