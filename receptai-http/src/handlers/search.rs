use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use receptai::error::CatalogError;
use receptai::{run_listing, ListingOutcome, ListingParams};

use super::AppState;
use crate::dto::SearchQuery;

/// Site-wide search. Same contract as the catalog listing, with the scope
/// optional and the free-text query primary. Both endpoints run the same
/// core pipeline, so filter semantics cannot drift between them.
#[utoipa::path(
    get,
    path = "/1/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matching recipes with facet counts", body = serde_json::Value),
        (status = 503, description = "Catalog temporarily unavailable")
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListingOutcome>, CatalogError> {
    let params = ListingParams {
        scope: query.scope.unwrap_or_default(),
        filters: query.filters,
        query: query.q,
        page: query.page,
        limit: query.limit,
        sort: query.sort,
        language: query.language,
    };
    let outcome = run_listing(&state.store, params).await?;
    Ok(Json(outcome))
}
