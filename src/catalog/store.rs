use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::catalog::seed;
use crate::error::{CatalogError, Result};
use crate::query::dimension::Dimension;
use crate::query::facets::{count_facets, FacetCounts};
use crate::query::filter::Predicate;
use crate::query::page::{paginate, Pagination, SortKey};
use crate::types::{RecipeDoc, ScopeFilter, Slug};

/// Store connection settings, resolved from the environment by the process
/// entry point.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// JSON dataset file to seed from at connect time and persist to on
    /// close. `None` starts an empty in-memory collection.
    pub data_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn from_env() -> StoreConfig {
        StoreConfig {
            data_path: std::env::var("RECEPTAI_DATA")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn in_memory() -> StoreConfig {
        StoreConfig::default()
    }
}

/// The connect-once document-store client.
///
/// Constructed explicitly by the process entry point and passed into the
/// query layer by reference — there is no module-level connection singleton.
/// All query methods fail with [`CatalogError::Store`] once the client is
/// closed; that is the single failure that surfaces to callers.
pub struct StoreClient {
    recipes: DashMap<Slug, RecipeDoc>,
    data_path: Option<PathBuf>,
    closed: AtomicBool,
}

impl StoreClient {
    /// Open the client, seeding from the configured dataset file when it
    /// exists.
    pub fn connect(config: StoreConfig) -> Result<Arc<StoreClient>> {
        let recipes = DashMap::new();
        if let Some(path) = &config.data_path {
            if path.exists() {
                for mut doc in seed::load_dataset(path)? {
                    seed::normalize(&mut doc);
                    recipes.insert(doc.slug.clone(), doc);
                }
                tracing::info!(recipes = recipes.len(), path = %path.display(), "catalog loaded");
            } else {
                tracing::info!(path = %path.display(), "no dataset file, starting empty");
            }
        }
        Ok(Arc::new(StoreClient {
            recipes,
            data_path: config.data_path,
            closed: AtomicBool::new(false),
        }))
    }

    /// Persist (when a dataset path is configured) and mark the client
    /// closed. Further queries fail with a store error.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(path) = &self.data_path {
            let docs: Vec<RecipeDoc> = self.recipes.iter().map(|e| e.value().clone()).collect();
            seed::save_dataset(path, &docs)?;
            tracing::info!(recipes = docs.len(), path = %path.display(), "catalog persisted");
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CatalogError::Store("store client is closed".to_string()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// One filtered, sorted, paginated query round-trip.
    pub async fn fetch_page(
        &self,
        predicate: &Predicate,
        sort: SortKey,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<RecipeDoc>, Pagination)> {
        self.ensure_open()?;
        let matched: Vec<RecipeDoc> = self
            .recipes
            .iter()
            .filter(|entry| predicate.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        Ok(paginate(matched, sort, page, limit))
    }

    /// The facet aggregation round-trip: counts over the scope anchor only.
    pub async fn count_scope_facets(
        &self,
        scope: &ScopeFilter,
        dimensions: &[Dimension],
    ) -> Result<FacetCounts> {
        self.ensure_open()?;
        let scoped: Vec<RecipeDoc> = self
            .recipes
            .iter()
            .filter(|entry| scope.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        Ok(count_facets(scoped.iter(), dimensions))
    }

    /// All documents in a scope, for the suggestion ranker.
    pub async fn scan_scope(&self, scope: &ScopeFilter) -> Result<Vec<RecipeDoc>> {
        self.ensure_open()?;
        Ok(self
            .recipes
            .iter()
            .filter(|entry| scope.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    pub async fn get(&self, slug: &str) -> Result<Option<RecipeDoc>> {
        self.ensure_open()?;
        Ok(self.recipes.get(slug).map(|entry| entry.value().clone()))
    }

    /// Ingestion seam: validate, normalize, and upsert a batch. Returns the
    /// number of documents written.
    pub async fn upsert_recipes(&self, docs: Vec<RecipeDoc>) -> Result<usize> {
        self.ensure_open()?;
        let mut accepted = 0;
        for mut doc in docs {
            seed::validate(&doc).map_err(CatalogError::InvalidDocument)?;
            seed::normalize(&mut doc);
            self.recipes.insert(doc.slug.clone(), doc);
            accepted += 1;
        }
        Ok(accepted)
    }

    /// Idempotent derived-bucket cache-fill: recompute every stored
    /// `time_bucket` from the raw minutes value and rewrite the ones that
    /// differ. Safe under concurrent invocation: last writer wins on a
    /// recomputable value. Read paths never depend on this running.
    pub async fn refresh_time_buckets(&self) -> Result<usize> {
        self.ensure_open()?;
        let mut refreshed = 0;
        for mut entry in self.recipes.iter_mut() {
            let current = entry.current_bucket();
            if entry.time_bucket != Some(current) {
                entry.time_bucket = Some(current);
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            tracing::debug!(refreshed, "derived time buckets refreshed");
        }
        Ok(refreshed)
    }
}
