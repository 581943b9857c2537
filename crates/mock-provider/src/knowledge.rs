//! Canned knowledge sources.

use std::sync::Arc;

use concierge_core::{async_trait, ConciergeError, KnowledgeItem, KnowledgeQuery, KnowledgeSource};
use tokio::sync::Mutex;

/// Serves a fixed list of items, filtered by kind and category/zone substring.
#[derive(Clone, Default)]
pub struct StaticKnowledge {
    items: Vec<KnowledgeItem>,
    queries: Arc<Mutex<Vec<KnowledgeQuery>>>,
}

impl StaticKnowledge {
    pub fn new(items: Vec<KnowledgeItem>) -> Self {
        Self {
            items,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An empty source.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every query received, in order.
    pub async fn queries(&self) -> Vec<KnowledgeQuery> {
        self.queries.lock().await.clone()
    }
}

fn contains(field: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => field
            .map(|f| f.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

#[async_trait]
impl KnowledgeSource for StaticKnowledge {
    async fn lookup(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeItem>, ConciergeError> {
        self.queries.lock().await.push(query.clone());

        Ok(self
            .items
            .iter()
            .filter(|item| item.kind == query.kind)
            .filter(|item| contains(Some(&item.category), query.category.as_deref()))
            .filter(|item| contains(item.zone.as_deref(), query.zone.as_deref()))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

/// A source whose every lookup fails.
#[derive(Debug, Clone, Default)]
pub struct FailingKnowledge;

#[async_trait]
impl KnowledgeSource for FailingKnowledge {
    async fn lookup(&self, _query: &KnowledgeQuery) -> Result<Vec<KnowledgeItem>, ConciergeError> {
        Err(ConciergeError::Knowledge("store unavailable".to_string()))
    }
}
