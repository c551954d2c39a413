use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{FilterOptions, FilterSelection, PickOutcome, PropertyNames},
    services::{catalog::CatalogClient, options, picker},
};

/// Entry point shared by the web and command-line front ends
///
/// Holds the catalog client and property names handed in at construction; nothing
/// else is read from the environment afterwards.
#[derive(Clone)]
pub struct WatchRoulette {
    catalog: Arc<dyn CatalogClient>,
    names: PropertyNames,
}

impl WatchRoulette {
    pub fn new(catalog: Arc<dyn CatalogClient>, names: PropertyNames) -> Self {
        Self { catalog, names }
    }

    /// Valid filter values from the catalog schema
    pub async fn filter_options(&self) -> AppResult<FilterOptions> {
        options::load_filter_options(self.catalog.as_ref(), &self.names).await
    }

    /// One random recommendation matching the selection
    pub async fn pick(&self, selection: &FilterSelection) -> AppResult<PickOutcome> {
        picker::pick_random(self.catalog.as_ref(), selection, &self.names).await
    }
}
