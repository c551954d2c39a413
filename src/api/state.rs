use std::sync::Arc;

use crate::{
    models::PropertyNames,
    services::{catalog::CatalogClient, WatchRoulette},
};

/// Shared application state
///
/// Read-only: every request performs its own catalog call, nothing is cached between them.
#[derive(Clone)]
pub struct AppState {
    pub roulette: WatchRoulette,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogClient>, names: PropertyNames) -> Self {
        Self {
            roulette: WatchRoulette::new(catalog, names),
        }
    }
}
