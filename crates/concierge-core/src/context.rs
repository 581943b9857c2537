//! Context builder: turns a chat request into a prompt.

use crate::message::ChatInput;
use crate::prompt::{tone_line, Prompt, CLARIFICATION_REPLY, DEFAULT_SYSTEM_PROMPT};

/// Default number of prior messages kept in a prompt.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Result of building a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOutcome {
    /// Nothing worth sending upstream; reply with this text directly.
    Clarify(String),
    /// Prompt ready for knowledge lookup and completion.
    Ready(Prompt),
}

/// Builds prompts from chat input with a bounded history window.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    system_prompt: String,
    history_window: usize,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_HISTORY_WINDOW)
    }
}

impl ContextBuilder {
    /// Create a builder with the given persona and window size (in messages).
    pub fn new(system_prompt: impl Into<String>, history_window: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history_window,
        }
    }

    /// The configured persona.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Maximum number of prior messages kept.
    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Build a prompt, or a clarification when the message is empty.
    pub fn build(&self, input: &ChatInput) -> ContextOutcome {
        let text = input.text.trim();
        if text.is_empty() {
            return ContextOutcome::Clarify(CLARIFICATION_REPLY.to_string());
        }

        let user_name = input
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let skip = input.history.len().saturating_sub(self.history_window);
        let history = input.history[skip..].to_vec();

        let system = format!(
            "{}\n\n{}",
            self.system_prompt,
            tone_line(input.membership, user_name)
        );

        ContextOutcome::Ready(Prompt {
            system,
            history,
            user_text: text.to_string(),
            membership: input.membership,
            user_name: user_name.map(str::to_string),
        })
    }
}
