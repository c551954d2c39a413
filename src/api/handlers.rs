use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{FilterOptions, FilterSelection, PickOutcome},
    render::html,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Filter form with no pick yet
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let options = state.roulette.filter_options().await;
    if let Err(e) = &options {
        tracing::error!(error = %e, "Failed to load filter options");
    }
    Html(html::page(&options, &FilterSelection::default(), None))
}

/// Filter form plus one recommendation for the submitted selection
///
/// Accepts repeated `language`, `type` and `genre` query keys.
/// The page redraws the filter form, so the options are reloaded before the pick;
/// the two catalog calls run one after the other.
pub async fn pick_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let selection = selection_from_params(params)?;

    let options = state.roulette.filter_options().await;
    if let Err(e) = &options {
        tracing::error!(request_id = %request_id, error = %e, "Failed to load filter options");
        return Ok(Html(html::page(&options, &selection, None)));
    }

    tracing::info!(
        request_id = %request_id,
        languages = selection.languages.len(),
        types = selection.types.len(),
        genres = selection.genres.len(),
        "Processing pick request"
    );

    let pick = state.roulette.pick(&selection).await;
    if let Err(e) = &pick {
        tracing::error!(request_id = %request_id, error = %e, "Pick failed");
    }

    Ok(Html(html::page(&options, &selection, Some(&pick))))
}

fn selection_from_params(params: Vec<(String, String)>) -> AppResult<FilterSelection> {
    let mut languages = Vec::new();
    let mut types = Vec::new();
    let mut genres = Vec::new();

    for (key, value) in params {
        match key.as_str() {
            "language" => languages.push(value),
            "type" => types.push(value),
            "genre" => genres.push(value),
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown filter field '{}'",
                    other
                )))
            }
        }
    }

    Ok(FilterSelection::new(languages, types, genres))
}

/// Valid filter values as JSON
pub async fn get_options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let options = state.roulette.filter_options().await?;
    Ok(Json(options))
}

/// One random recommendation as JSON
pub async fn pick(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<FilterSelection>, JsonRejection>,
) -> AppResult<Json<PickOutcome>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let selection = FilterSelection::new(request.languages, request.types, request.genres);

    tracing::info!(
        request_id = %request_id,
        unconstrained = selection.is_unconstrained(),
        "Processing pick request"
    );

    let outcome = state.roulette.pick(&selection).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_selection_from_repeated_keys() {
        let selection = selection_from_params(pairs(&[
            ("language", "Korean"),
            ("genre", "Thriller"),
            ("language", "Chinese"),
            ("type", "Movie"),
        ]))
        .unwrap();

        assert_eq!(selection.languages, vec!["Korean", "Chinese"]);
        assert_eq!(selection.types, vec!["Movie"]);
        assert_eq!(selection.genres, vec!["Thriller"]);
    }

    #[test]
    fn test_unknown_key_is_invalid_input() {
        let err = selection_from_params(pairs(&[("rating", "5")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
