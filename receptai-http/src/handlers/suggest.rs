use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use receptai::error::CatalogError;
use receptai::suggest::{suggest, Suggestion, DEFAULT_SUGGESTIONS};
use receptai::types::ScopeFilter;

use super::AppState;
use crate::dto::SuggestQuery;

/// Search-as-you-type suggestions over primary-language titles.
#[utoipa::path(
    get,
    path = "/1/suggest",
    tag = "search",
    params(SuggestQuery),
    responses(
        (status = 200, description = "Ranked suggestions; empty for queries under 2 characters", body = serde_json::Value)
    )
)]
pub async fn suggest_titles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<serde_json::Value>, CatalogError> {
    let scope = ScopeFilter::parse(query.scope.as_deref().unwrap_or(""));
    let limit = query
        .limit
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_SUGGESTIONS);
    let suggestions: Vec<Suggestion> = suggest(
        &state.store,
        &scope,
        query.q.as_deref().unwrap_or(""),
        limit,
    )
    .await?;
    Ok(Json(serde_json::json!({ "suggestions": suggestions })))
}
