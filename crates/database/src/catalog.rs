//! Read access to establishments, events and services.
//!
//! The three tables share a shape; only events carry a date. Filters are
//! substring matches (`LIKE`) on category and zone, with `%` and `_` in the
//! filter matched literally. SQLite folds case for ASCII letters only, so
//! `"Banús"` does not match `"BANÚS"`. Results come back best-rated first
//! with unrated rows last. Events are ordered by date before rating.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::CatalogItem;

/// Hard ceiling on rows returned by one search.
pub const MAX_SEARCH_LIMIT: i64 = 50;

/// Which catalog table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Establishment,
    Event,
    Service,
}

impl CatalogKind {
    fn table(&self) -> &'static str {
        match self {
            CatalogKind::Establishment => "establishments",
            CatalogKind::Event => "events",
            CatalogKind::Service => "services",
        }
    }

    fn entity(&self) -> &'static str {
        match self {
            CatalogKind::Establishment => "Establishment",
            CatalogKind::Event => "Event",
            CatalogKind::Service => "Service",
        }
    }
}

/// Search filters. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub zone: Option<String>,
    /// Earliest event date, inclusive (`YYYY-MM-DD`). Ignored for non-events.
    pub from: Option<String>,
    /// Latest event date, inclusive (`YYYY-MM-DD`). Ignored for non-events.
    pub to: Option<String>,
    pub limit: i64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wrap a filter value as a `LIKE ... ESCAPE '\'` substring pattern.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Search one catalog table.
pub async fn search(pool: &SqlitePool, kind: CatalogKind, filter: &CatalogFilter) -> Result<Vec<CatalogItem>> {
    let limit = filter.limit.clamp(1, MAX_SEARCH_LIMIT);
    let category = non_empty(&filter.category).map(contains_pattern);
    let zone = non_empty(&filter.zone).map(contains_pattern);

    let items = match kind {
        CatalogKind::Event => {
            sqlx::query_as::<_, CatalogItem>(
                r#"
                SELECT id, name, category, zone, rating, description, date
                FROM events
                WHERE (?1 IS NULL OR category LIKE ?1 ESCAPE '\')
                  AND (?2 IS NULL OR zone LIKE ?2 ESCAPE '\')
                  AND (?3 IS NULL OR date >= ?3)
                  AND (?4 IS NULL OR date <= ?4)
                ORDER BY date, rating IS NULL, rating DESC, name
                LIMIT ?5
                "#,
            )
            .bind(&category)
            .bind(&zone)
            .bind(non_empty(&filter.from))
            .bind(non_empty(&filter.to))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        _ => {
            let sql = format!(
                r#"
                SELECT id, name, category, zone, rating, description, NULL AS date
                FROM {}
                WHERE (?1 IS NULL OR category LIKE ?1 ESCAPE '\')
                  AND (?2 IS NULL OR zone LIKE ?2 ESCAPE '\')
                ORDER BY rating IS NULL, rating DESC, name
                LIMIT ?3
                "#,
                kind.table()
            );
            sqlx::query_as::<_, CatalogItem>(&sql)
                .bind(&category)
                .bind(&zone)
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(items)
}

/// Get a single catalog row by ID.
pub async fn get_item(pool: &SqlitePool, kind: CatalogKind, id: &str) -> Result<CatalogItem> {
    let date = match kind {
        CatalogKind::Event => "date",
        _ => "NULL AS date",
    };
    let sql = format!(
        "SELECT id, name, category, zone, rating, description, {} FROM {} WHERE id = ?",
        date,
        kind.table()
    );

    sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: kind.entity(),
            id: id.to_string(),
        })
}

/// Insert or replace a catalog row. Events require a date.
pub async fn upsert_item(pool: &SqlitePool, kind: CatalogKind, item: &CatalogItem) -> Result<()> {
    match kind {
        CatalogKind::Event => {
            let date = item.date.as_deref().ok_or_else(|| {
                DatabaseError::Validation(crate::ValidationError::Empty("date".to_string()))
            })?;
            crate::validation::validate_date(date)?;

            sqlx::query(
                r#"
                INSERT OR REPLACE INTO events (id, name, category, zone, date, rating, description)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.zone)
            .bind(date)
            .bind(item.rating)
            .bind(&item.description)
            .execute(pool)
            .await?;
        }
        _ => {
            let sql = format!(
                "INSERT OR REPLACE INTO {} (id, name, category, zone, rating, description) \
                 VALUES (?, ?, ?, ?, ?, ?)",
                kind.table()
            );
            sqlx::query(&sql)
                .bind(&item.id)
                .bind(&item.name)
                .bind(&item.category)
                .bind(&item.zone)
                .bind(item.rating)
                .bind(&item.description)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
