//! Knowledge lookup types and the `KnowledgeSource` trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ConciergeError;
use crate::intent::DateRange;

/// Upper bound on records injected into one prompt.
pub const MAX_KNOWLEDGE_ITEMS: usize = 10;

/// Which kind of record a knowledge item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeKind {
    Establishment,
    Event,
    Service,
}

/// A flat record retrieved from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub kind: KnowledgeKind,
    pub name: String,
    pub category: String,
    pub zone: Option<String>,
    pub rating: Option<f64>,
    /// Event date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub description: Option<String>,
}

impl KnowledgeItem {
    /// One-line rendering used in prompts.
    pub fn summary_line(&self) -> String {
        let mut line = format!("{} ({}", self.name, self.category);
        if let Some(ref zone) = self.zone {
            line.push_str(", ");
            line.push_str(zone);
        }
        if let Some(ref date) = self.date {
            line.push_str(", le ");
            line.push_str(date);
        }
        if let Some(rating) = self.rating {
            line.push_str(&format!(", note {:.1}", rating));
        }
        line.push(')');
        if let Some(ref description) = self.description {
            line.push_str(" : ");
            line.push_str(description);
        }
        line
    }
}

/// A single filtered read against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeQuery {
    pub kind: KnowledgeKind,
    /// Case-insensitive substring of the category column.
    pub category: Option<String>,
    /// Case-insensitive substring of the zone column.
    pub zone: Option<String>,
    /// Date window; only meaningful for events.
    pub dates: Option<DateRange>,
    pub limit: usize,
}

/// A read-only source of establishments, events and services.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Return at most `query.limit` records matching the query.
    async fn lookup(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeItem>, ConciergeError>;
}
