use axum::{extract::State, Json};
use std::sync::Arc;

use receptai::error::CatalogError;

use super::AppState;
use crate::dto::{IngestRequest, IngestResponse, RefreshResponse};

/// Batch upsert, the seam for the external ingestion/authoring process.
#[utoipa::path(
    post,
    path = "/internal/recipes",
    tag = "internal",
    request_body(content = serde_json::Value, description = "`{\"recipes\": [...]}` batch of recipe documents"),
    responses(
        (status = 200, description = "Number of documents written", body = IngestResponse),
        (status = 400, description = "A document failed validation")
    )
)]
pub async fn ingest_recipes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, CatalogError> {
    let accepted = state.store.upsert_recipes(request.recipes).await?;
    tracing::info!(accepted, "recipes ingested");
    Ok(Json(IngestResponse { accepted }))
}

/// Trigger the idempotent derived-bucket cache-fill sweep.
#[utoipa::path(
    post,
    path = "/internal/recipes/refresh-buckets",
    tag = "internal",
    responses(
        (status = 200, description = "Number of stored buckets rewritten", body = RefreshResponse)
    )
)]
pub async fn refresh_buckets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, CatalogError> {
    let refreshed = state.store.refresh_time_buckets().await?;
    Ok(Json(RefreshResponse { refreshed }))
}
