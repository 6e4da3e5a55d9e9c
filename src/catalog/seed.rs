use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::Result;
use crate::types::RecipeDoc;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex"));

static CATEGORY_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+(?:/[a-z0-9-]+)*$").expect("category path regex"));

/// URL-safe recipe slug: lowercase ascii segments joined by single dashes.
pub fn valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Slash-delimited category path of slug segments.
pub fn valid_category_path(path: &str) -> bool {
    CATEGORY_PATH_RE.is_match(path)
}

/// Load a JSON dataset file (an array of recipe documents).
///
/// The file is produced by the external ingestion process; entries that fail
/// validation are skipped with a warning rather than failing the whole load.
pub fn load_dataset(path: &Path) -> Result<Vec<RecipeDoc>> {
    let data = std::fs::read_to_string(path)?;
    let docs: Vec<RecipeDoc> = serde_json::from_str(&data)?;
    let total = docs.len();
    let valid: Vec<RecipeDoc> = docs
        .into_iter()
        .filter(|doc| match validate(doc) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(slug = %doc.slug, %reason, "skipping invalid dataset entry");
                false
            }
        })
        .collect();
    if valid.len() < total {
        tracing::warn!(
            skipped = total - valid.len(),
            loaded = valid.len(),
            "dataset contained invalid entries"
        );
    }
    Ok(valid)
}

/// Persist the dataset, sorted by slug for a stable file layout.
pub fn save_dataset(path: &Path, docs: &[RecipeDoc]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut sorted: Vec<&RecipeDoc> = docs.iter().collect();
    sorted.sort_by(|a, b| a.slug.cmp(&b.slug));
    let json = serde_json::to_string_pretty(&sorted)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Structural validation shared by dataset loading and API ingestion.
pub(crate) fn validate(doc: &RecipeDoc) -> std::result::Result<(), String> {
    if !valid_slug(&doc.slug) {
        return Err(format!("invalid slug '{}'", doc.slug));
    }
    if doc.title.primary().is_empty() {
        return Err("missing primary-language title".to_string());
    }
    if let Some(bad) = doc.categories.iter().find(|c| !valid_category_path(c)) {
        return Err(format!("invalid category path '{}'", bad));
    }
    Ok(())
}

/// In-place normalization applied on every write: facet values and tags are
/// lowercase by contract.
pub(crate) fn normalize(doc: &mut RecipeDoc) {
    for list in [
        &mut doc.categories,
        &mut doc.tags,
        &mut doc.dietary,
        &mut doc.cuisine,
        &mut doc.main_ingredient,
        &mut doc.meal_type,
    ] {
        for value in list.iter_mut() {
            *value = value.trim().to_lowercase();
        }
        list.retain(|v| !v.is_empty());
    }
}
