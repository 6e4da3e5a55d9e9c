use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use receptai::types::RecipeDoc;

/// Query parameters of the category/subcategory/tag listing endpoint.
///
/// Numeric parameters arrive as raw strings so a malformed value degrades to
/// its default inside the core instead of failing extraction with a 400.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Serialized filter expression, e.g. `timeRequired:30min,dietary:vegan`.
    pub filters: Option<String>,
    /// Optional free-text query; fewer than 2 chars means no constraint.
    pub q: Option<String>,
    /// Page number, default 1.
    pub page: Option<String>,
    /// Page size, default 12, clamped to [1, 24].
    pub limit: Option<String>,
    /// One of `newest`, `rating`, `time`, `popular`, `alphabetical`.
    pub sort: Option<String>,
    /// ISO language code, default `lt`.
    pub language: Option<String>,
}

/// Query parameters of the site-wide search endpoint: the listing contract
/// plus an optional scope.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Optional anchoring scope; empty searches the whole catalog.
    pub scope: Option<String>,
    pub filters: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestQuery {
    /// Partial query; fewer than 2 chars yields an empty list.
    pub q: Option<String>,
    pub scope: Option<String>,
    /// Default 5, max 10.
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeQuery {
    pub language: Option<String>,
}

/// Batch upsert body of the internal ingestion endpoint.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub recipes: Vec<RecipeDoc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub accepted: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub refreshed: usize,
}
