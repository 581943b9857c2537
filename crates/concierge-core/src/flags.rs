//! Feature flags carried explicitly through the request path.

use serde::{Deserialize, Serialize};

/// Behavior overrides for a single request.
///
/// Loaded once from configuration and handed to each handler; nothing reads
/// these from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Query the knowledge store before calling the provider.
    pub knowledge_lookup: bool,
    /// Allow the chat endpoint to open new conversations in the store.
    pub conversation_creation: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            knowledge_lookup: true,
            conversation_creation: true,
        }
    }
}

impl FeatureFlags {
    /// Flags with every optional behavior switched off.
    pub fn minimal() -> Self {
        Self {
            knowledge_lookup: false,
            conversation_creation: false,
        }
    }
}
