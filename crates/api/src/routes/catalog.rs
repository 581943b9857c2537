//! Read-only catalog routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use database::{catalog, CatalogFilter, CatalogKind};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Default page size when `limit` is absent.
pub const DEFAULT_LIMIT: i64 = 20;

/// Query string accepted by the catalog routes.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub category: Option<String>,
    pub zone: Option<String>,
    /// Earliest event date, `YYYY-MM-DD`. Events only.
    pub from: Option<String>,
    pub limit: Option<i64>,
}

impl CatalogParams {
    fn into_filter(self, kind: CatalogKind) -> Result<CatalogFilter> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            return Err(ApiError::BadRequest("limit must be positive".to_string()));
        }

        let from = match (kind, self.from) {
            (CatalogKind::Event, Some(from)) => {
                NaiveDate::parse_from_str(&from, "%Y-%m-%d").map_err(|_| {
                    ApiError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", from))
                })?;
                Some(from)
            }
            _ => None,
        };

        Ok(CatalogFilter {
            category: self.category,
            zone: self.zone,
            from,
            to: None,
            limit: limit.min(catalog::MAX_SEARCH_LIMIT),
        })
    }
}

async fn list(
    state: &AppState,
    kind: CatalogKind,
    key: &str,
    params: std::result::Result<Query<CatalogParams>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(params) = params?;
    let filter = params.into_filter(kind)?;
    let items = catalog::search(state.db.pool(), kind, &filter).await?;

    Ok(Json(json!({
        "success": true,
        "count": items.len(),
        key: items,
    })))
}

async fn fetch(state: &AppState, kind: CatalogKind, key: &str, id: &str) -> Result<Json<Value>> {
    let item = catalog::get_item(state.db.pool(), kind, id).await?;
    Ok(Json(json!({
        "success": true,
        key: item,
    })))
}

/// List establishments.
pub async fn establishments(
    State(state): State<AppState>,
    params: std::result::Result<Query<CatalogParams>, QueryRejection>,
) -> Result<Json<Value>> {
    list(&state, CatalogKind::Establishment, "establishments", params).await
}

/// List events in date order.
pub async fn events(
    State(state): State<AppState>,
    params: std::result::Result<Query<CatalogParams>, QueryRejection>,
) -> Result<Json<Value>> {
    list(&state, CatalogKind::Event, "events", params).await
}

/// List services.
pub async fn services(
    State(state): State<AppState>,
    params: std::result::Result<Query<CatalogParams>, QueryRejection>,
) -> Result<Json<Value>> {
    list(&state, CatalogKind::Service, "services", params).await
}

/// Fetch one establishment.
pub async fn establishment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    fetch(&state, CatalogKind::Establishment, "establishment", &id).await
}

/// Fetch one event.
pub async fn event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    fetch(&state, CatalogKind::Event, "event", &id).await
}

/// Fetch one service.
pub async fn service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    fetch(&state, CatalogKind::Service, "service", &id).await
}
