use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use crate::handlers::{
    catalog_listing, get_recipe, health, ingest_recipes, refresh_buckets, search, suggest_titles,
    AppState,
};
use crate::openapi::ApiDoc;
use receptai::{StoreClient, StoreConfig};

/// Build the route table around a connected store client.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_spec))
        .route("/1/catalog/*scope", get(catalog_listing))
        .route("/1/search", get(search))
        .route("/1/suggest", get(suggest_titles))
        .route("/1/recipes/:slug", get(get_recipe))
        .route("/internal/recipes", post(ingest_recipes))
        .route("/internal/recipes/refresh-buckets", post(refresh_buckets))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = StoreClient::connect(StoreConfig::from_env())?;
    tracing::info!(recipes = store.len(), "store client connected");

    // Best-effort derived-bucket cache-fill. Read paths never depend on it;
    // 0 disables the loop.
    let refresh_secs: u64 = std::env::var("RECEPTAI_BUCKET_REFRESH_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600);
    if refresh_secs > 0 {
        let store_for_refresh = Arc::clone(&store);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(refresh_secs)).await;
                match store_for_refresh.refresh_time_buckets().await {
                    Ok(refreshed) if refreshed > 0 => {
                        tracing::info!(refreshed, "derived time buckets refreshed");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "bucket refresh sweep stopped");
                        break;
                    }
                }
            }
        });
        tracing::info!("bucket refresh loop enabled (every {}s)", refresh_secs);
    }

    let state = Arc::new(AppState {
        store: Arc::clone(&store),
        start_time: std::time::Instant::now(),
    });
    let app = router(state);

    let bind_addr =
        std::env::var("RECEPTAI_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:7800".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await?;
    tracing::info!("store client closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
