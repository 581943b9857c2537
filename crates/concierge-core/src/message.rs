//! Chat message types.

use serde::{Deserialize, Serialize};

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: Role,
    /// Message text. Clients may send this as `content`.
    #[serde(alias = "content")]
    pub text: String,
    /// Unix timestamp in milliseconds, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: None,
        }
    }

    /// Attach a timestamp.
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Membership status of the person chatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    Guest,
    Member,
}

impl From<bool> for Membership {
    fn from(is_member: bool) -> Self {
        if is_member {
            Membership::Member
        } else {
            Membership::Guest
        }
    }
}

/// Everything the pipeline needs from one chat request.
#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    /// The new message text.
    pub text: String,
    /// Display name, if the client sent one.
    pub user_name: Option<String>,
    /// Guest or member.
    pub membership: Membership,
    /// Prior turns, oldest first.
    pub history: Vec<Message>,
}

impl ChatInput {
    /// Create an input with no history from a guest.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the display name.
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    /// Set the membership.
    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }

    /// Set the prior turns.
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}
