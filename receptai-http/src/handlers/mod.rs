use receptai::StoreClient;
use std::sync::Arc;

pub mod health;
pub mod internal;
pub mod listing;
pub mod recipes;
pub mod search;
pub mod suggest;

pub struct AppState {
    pub store: Arc<StoreClient>,
    pub start_time: std::time::Instant,
}

pub use health::health;
pub use internal::{ingest_recipes, refresh_buckets};
pub use listing::catalog_listing;
pub use recipes::get_recipe;
pub use search::search;
pub use suggest::suggest_titles;
