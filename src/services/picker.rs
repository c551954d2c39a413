use rand::{seq::SliceRandom, Rng};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{FilterSelection, PickOutcome, PropertyNames},
    services::{catalog::CatalogClient, normalize::normalize_entry, query::QueryBody},
};

/// Queries the catalog once and picks one matching entry uniformly at random
///
/// An empty result list is a valid outcome (`PickOutcome::NoMatch`), not an error.
/// Each call is an independent draw.
pub async fn pick_random(
    client: &dyn CatalogClient,
    selection: &FilterSelection,
    names: &PropertyNames,
) -> AppResult<PickOutcome> {
    let body = QueryBody::from_selection(selection, names);
    let entries = client.query(body).await?;

    let chosen = {
        let mut rng = rand::thread_rng();
        select_entry(&entries, &mut rng)
    };

    let Some(entry) = chosen else {
        tracing::info!(provider = client.name(), "No entries matched the filters");
        return Ok(PickOutcome::NoMatch);
    };

    let recommendation = normalize_entry(entry, names)?;

    tracing::info!(
        candidates = entries.len(),
        title = %recommendation.title,
        provider = client.name(),
        "Recommendation picked"
    );

    Ok(PickOutcome::Found { recommendation })
}

/// Uniform choice over the entries, `None` when there are none
pub fn select_entry<'a, R>(entries: &'a [Value], rng: &mut R) -> Option<&'a Value>
where
    R: Rng + ?Sized,
{
    entries.choose(rng)
}
