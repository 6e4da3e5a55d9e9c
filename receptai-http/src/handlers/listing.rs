use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use receptai::error::CatalogError;
use receptai::{run_listing, ListingOutcome, ListingParams};

use super::AppState;
use crate::dto::ListingQuery;

/// Category, subcategory, or tag listing with facet counts.
#[utoipa::path(
    get,
    path = "/1/catalog/{scope}",
    tag = "catalog",
    params(
        ("scope" = String, Path, description = "Category/subcategory path or tag:name"),
        ListingQuery
    ),
    responses(
        (status = 200, description = "One page of recipes with pagination, available filters, and the echoed selection", body = serde_json::Value),
        (status = 503, description = "Catalog temporarily unavailable")
    )
)]
pub async fn catalog_listing(
    State(state): State<Arc<AppState>>,
    Path(scope): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingOutcome>, CatalogError> {
    let params = ListingParams {
        scope,
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
