//! Application state shared across handlers.

use std::sync::Arc;

use concierge_core::{Concierge, FeatureFlags};
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Chat pipeline.
    pub concierge: Arc<Concierge>,
    /// Behavior overrides.
    pub flags: FeatureFlags,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, concierge: Concierge, flags: FeatureFlags) -> Self {
        Self {
            db,
            concierge: Arc::new(concierge),
            flags,
        }
    }
}
