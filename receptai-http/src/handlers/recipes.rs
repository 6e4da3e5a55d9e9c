use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use receptai::error::CatalogError;
use receptai::query::project::ProjectedRecipe;
use receptai::types::DEFAULT_LANGUAGE;

use super::AppState;
use crate::dto::RecipeQuery;

/// Fetch one recipe by slug, resolved to the requested language.
#[utoipa::path(
    get,
    path = "/1/recipes/{slug}",
    tag = "catalog",
    params(
        ("slug" = String, Path, description = "Recipe slug"),
        RecipeQuery
    ),
    responses(
        (status = 200, description = "The projected recipe", body = serde_json::Value),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<ProjectedRecipe>, CatalogError> {
    let language = query
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_lowercase();
    let doc = state
        .store
        .get(&slug)
        .await?
        .ok_or_else(|| CatalogError::RecipeNotFound(slug))?;
    Ok(Json(ProjectedRecipe::project(&doc, &language)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use chrono::{TimeZone, Utc};
    use receptai::types::{Localized, Rating, RecipeDoc};
    use receptai::{StoreClient, StoreConfig};
    use tower::ServiceExt;

    async fn make_app() -> Router {
        let store = StoreClient::connect(StoreConfig::in_memory()).unwrap();
        store
            .upsert_recipes(vec![RecipeDoc {
                slug: "cepelinai".into(),
                title: Localized::new("Cepelinai").with("en", "Zeppelins"),
                description: Localized::new("Tradicinis patiekalas"),
                ingredients: vec![],
                total_time_minutes: Some(90),
                time_bucket: None,
                categories: vec!["bulviu-patiekalai".into()],
                tags: vec![],
                dietary: vec![],
                cuisine: vec!["lietuviu".into()],
                main_ingredient: vec!["bulves".into()],
                meal_type: vec![],
                rating: Rating {
                    average: 4.7,
                    count: 210,
                },
                published_at: Utc.with_ymd_and_hms(2023, 11, 5, 9, 0, 0).unwrap(),
                created_at: None,
            }])
            .await
            .unwrap();
        let state = Arc::new(AppState {
            store,
            start_time: std::time::Instant::now(),
        });
        Router::new()
            .route("/1/recipes/:slug", get(get_recipe))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn returns_projected_recipe_in_default_language() {
        let app = make_app().await;
        let (status, json) = get_json(app, "/1/recipes/cepelinai").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Cepelinai");
        assert_eq!(json["timeRequired"], "2h");
        assert_eq!(json["language"], "lt");
    }

    #[tokio::test]
    async fn resolves_requested_language_with_fallback() {
        let app = make_app().await;
        let (_, json) = get_json(app, "/1/recipes/cepelinai?language=en").await;
        assert_eq!(json["title"], "Zeppelins");
        // description has no English variant, falls back to lt
        assert_eq!(json["description"], "Tradicinis patiekalas");
    }

    #[tokio::test]
    async fn unknown_slug_is_404() {
        let app = make_app().await;
        let (status, json) = get_json(app, "/1/recipes/nesamas").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "recipe_not_found");
    }
}
