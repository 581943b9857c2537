//! Prompt assembly and fingerprinting.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::knowledge::KnowledgeItem;
use crate::message::{Membership, Message, Role};

/// Built-in persona used when no system prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Tu es Gliitz, le concierge de luxe de Marbella. \
Tu recommandes restaurants, beach clubs, événements et services haut de gamme. \
Réponds dans la langue de l'utilisateur, de façon chaleureuse, précise et concise. \
Ne recommande que des lieux présents dans les données fournies quand elles existent.";

/// Reply sent when the message text is empty.
pub const CLARIFICATION_REPLY: &str = "Pourriez-vous préciser votre demande ? \
Je peux vous recommander des restaurants, des événements ou des services à Marbella.";

/// Reply sent when the completion provider fails.
pub const FALLBACK_REPLY: &str = "Désolé, je rencontre un souci technique pour le moment. \
Pouvez-vous réessayer dans quelques instants ?";

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Role of a message sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
            PromptRole::Assistant => "assistant",
        }
    }
}

impl From<Role> for PromptRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => PromptRole::User,
            Role::Assistant => PromptRole::Assistant,
        }
    }
}

/// One message of the serialized prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }
}

/// A prompt ready to be combined with knowledge and sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Persona plus tone instructions.
    pub system: String,
    /// Windowed history, oldest first.
    pub history: Vec<Message>,
    /// The new user message, trimmed.
    pub user_text: String,
    /// Guest or member.
    pub membership: Membership,
    /// Display name, if known.
    pub user_name: Option<String>,
}

impl Prompt {
    /// Serialize into provider messages: system, history, then the new message.
    ///
    /// Knowledge items, if any, are appended to the system message.
    pub fn to_messages(&self, knowledge: &[KnowledgeItem]) -> Vec<PromptMessage> {
        let mut system = self.system.clone();
        if !knowledge.is_empty() {
            system.push_str("\n\n");
            system.push_str(&format_knowledge(knowledge));
        }

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(PromptMessage::system(system));
        for msg in &self.history {
            messages.push(PromptMessage {
                role: msg.role.into(),
                content: msg.text.clone(),
            });
        }
        messages.push(PromptMessage::user(self.user_text.clone()));
        messages
    }
}

/// Tone instruction appended to the system prompt.
pub(crate) fn tone_line(membership: Membership, user_name: Option<&str>) -> String {
    let who = match user_name {
        Some(name) => format!("L'utilisateur s'appelle {}", name),
        None => "L'utilisateur n'a pas donné son nom".to_string(),
    };

    match membership {
        Membership::Member => format!(
            "{} et il est membre Gliitz : traite-le en client privilégié, \
propose les accès prioritaires et les réservations directes.",
            who
        ),
        Membership::Guest => format!(
            "{} et il est invité : reste accueillant et mentionne à l'occasion \
les avantages de l'adhésion Gliitz.",
            who
        ),
    }
}

fn format_knowledge(items: &[KnowledgeItem]) -> String {
    let mut block = String::from("Données disponibles (à privilégier dans ta réponse) :");
    for item in items {
        block.push_str("\n- ");
        block.push_str(&item.summary_line());
    }
    block
}
