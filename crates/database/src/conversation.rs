//! Conversation and message persistence.
//!
//! Messages are append-only and time-ordered within a conversation. A single
//! message older than the conversation's latest one is rejected; an exchange
//! is stamped forward instead.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Conversation, StoredMessage};
use crate::validation::validate_role;

/// Open a new conversation for a user identifier.
pub async fn create_conversation(pool: &SqlitePool, user_id: &str) -> Result<Conversation> {
    if user_id.trim().is_empty() {
        return Err(crate::ValidationError::Empty("userId".to_string()).into());
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO conversations (id, user_id)
        VALUES (?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .execute(pool)
    .await?;

    tracing::debug!(conversation_id = %id, user_id, "Conversation created");

    get_conversation(pool, &id).await
}

/// Get a conversation by ID.
pub async fn get_conversation(pool: &SqlitePool, id: &str) -> Result<Conversation> {
    sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, user_id, created_at
        FROM conversations
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Conversation",
        id: id.to_string(),
    })
}

/// Append a message, enforcing time order.
pub async fn append_message(
    pool: &SqlitePool,
    conversation_id: &str,
    role: &str,
    text: &str,
    timestamp: i64,
) -> Result<StoredMessage> {
    validate_role(role)?;

    let mut tx = pool.begin().await?;
    claim(&mut tx, conversation_id, timestamp).await?;
    let message = insert_message(&mut tx, conversation_id, role, text, timestamp).await?;
    tx.commit().await?;

    Ok(message)
}

/// Append a user message and the assistant reply to it as one unit.
///
/// Either both rows are stored, adjacent to each other, or neither is. A
/// `timestamp` behind the conversation's latest message is raised to it, so
/// exchanges stamped from a server clock never fail the order check when
/// they race. Returns the stored pair.
pub async fn append_exchange(
    pool: &SqlitePool,
    conversation_id: &str,
    user_text: &str,
    reply_text: &str,
    timestamp: i64,
) -> Result<(StoredMessage, StoredMessage)> {
    let mut tx = pool.begin().await?;
    let stamped = advance(&mut tx, conversation_id, timestamp).await?;
    let question = insert_message(&mut tx, conversation_id, "user", user_text, stamped).await?;
    let answer = insert_message(&mut tx, conversation_id, "assistant", reply_text, stamped).await?;
    tx.commit().await?;

    tracing::debug!(conversation_id, timestamp = stamped, "Exchange stored");

    Ok((question, answer))
}

/// Move `last_message_at` forward to at least `timestamp` and return it.
///
/// Like [`claim`], this writes before it reads.
async fn advance(conn: &mut SqliteConnection, conversation_id: &str, timestamp: i64) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE conversations
        SET last_message_at = MAX(COALESCE(last_message_at, ?2), ?2)
        WHERE id = ?1
        RETURNING last_message_at
        "#,
    )
    .bind(conversation_id)
    .bind(timestamp)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Conversation",
        id: conversation_id.to_string(),
    })
}

/// Advance the conversation's `last_message_at`, or explain why not.
///
/// This is the transaction's first statement and a write, so it takes the
/// write lock before anything is read; concurrent appends wait on the busy
/// timeout instead of failing on a lock upgrade.
async fn claim(conn: &mut SqliteConnection, conversation_id: &str, timestamp: i64) -> Result<()> {
    let claimed = sqlx::query(
        r#"
        UPDATE conversations
        SET last_message_at = ?2
        WHERE id = ?1 AND (last_message_at IS NULL OR last_message_at <= ?2)
        "#,
    )
    .bind(conversation_id)
    .bind(timestamp)
    .execute(&mut *conn)
    .await?;

    if claimed.rows_affected() == 1 {
        return Ok(());
    }

    let last = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        SELECT last_message_at FROM conversations WHERE id = ?
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(&mut *conn)
    .await?;

    match last {
        None => Err(DatabaseError::NotFound {
            entity: "Conversation",
            id: conversation_id.to_string(),
        }),
        Some(last) => Err(DatabaseError::OutOfOrder {
            conversation_id: conversation_id.to_string(),
            last: last.unwrap_or_default(),
            given: timestamp,
        }),
    }
}

async fn insert_message(
    conn: &mut SqliteConnection,
    conversation_id: &str,
    role: &str,
    text: &str,
    timestamp: i64,
) -> Result<StoredMessage> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO messages (conversation_id, role, text, timestamp)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(conversation_id)
    .bind(role)
    .bind(text)
    .bind(timestamp)
    .fetch_one(&mut *conn)
    .await?;

    Ok(StoredMessage {
        id,
        conversation_id: conversation_id.to_string(),
        role: role.to_string(),
        text: text.to_string(),
        timestamp,
    })
}

/// List a conversation's messages in time order.
pub async fn list_messages(pool: &SqlitePool, conversation_id: &str) -> Result<Vec<StoredMessage>> {
    get_conversation(pool, conversation_id).await?;

    let messages = sqlx::query_as::<_, StoredMessage>(
        r#"
        SELECT id, conversation_id, role, text, timestamp
        FROM messages
        WHERE conversation_id = ?
        ORDER BY timestamp, id
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// List a user's conversations, newest first.
pub async fn list_conversations_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Conversation>> {
    let conversations = sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, user_id, created_at
        FROM conversations
        WHERE user_id = ?
        ORDER BY created_at DESC, id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(conversations)
}
