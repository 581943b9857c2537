//! Catalog-backed knowledge source.

use concierge_core::{
    async_trait, ConciergeError, KnowledgeItem, KnowledgeKind, KnowledgeQuery, KnowledgeSource,
};
use database::{catalog, CatalogFilter, CatalogItem, CatalogKind, Database};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Answers knowledge queries from the establishment, event and service tables.
#[derive(Clone)]
pub struct DatabaseKnowledge {
    db: Database,
}

impl DatabaseKnowledge {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn catalog_kind(kind: KnowledgeKind) -> CatalogKind {
    match kind {
        KnowledgeKind::Establishment => CatalogKind::Establishment,
        KnowledgeKind::Event => CatalogKind::Event,
        KnowledgeKind::Service => CatalogKind::Service,
    }
}

fn filter_for(query: &KnowledgeQuery) -> CatalogFilter {
    let dates = match query.kind {
        KnowledgeKind::Event => query.dates,
        _ => None,
    };

    CatalogFilter {
        category: query.category.clone(),
        zone: query.zone.clone(),
        from: dates.map(|range| range.from.format(DATE_FORMAT).to_string()),
        to: dates
            .and_then(|range| range.to)
            .map(|day| day.format(DATE_FORMAT).to_string()),
        limit: query.limit as i64,
    }
}

fn to_knowledge(kind: KnowledgeKind, item: CatalogItem) -> KnowledgeItem {
    KnowledgeItem {
        kind,
        name: item.name,
        category: item.category,
        zone: item.zone,
        rating: item.rating,
        date: item.date,
        description: item.description,
    }
}

#[async_trait]
impl KnowledgeSource for DatabaseKnowledge {
    async fn lookup(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeItem>, ConciergeError> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let filter = filter_for(query);
        debug!(kind = ?query.kind, ?filter, "Catalog lookup");

        let items = catalog::search(self.db.pool(), catalog_kind(query.kind), &filter)
            .await
            .map_err(|e| ConciergeError::Knowledge(e.to_string()))?;

        Ok(items
            .into_iter()
            .map(|item| to_knowledge(query.kind, item))
            .collect())
    }
}
