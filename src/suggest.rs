use serde::Serialize;

use crate::catalog::store::StoreClient;
use crate::error::Result;
use crate::query::filter::MIN_QUERY_LEN;
use crate::types::ScopeFilter;

pub const DEFAULT_SUGGESTIONS: usize = 5;
pub const MAX_SUGGESTIONS: usize = 10;

/// One search-as-you-type suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub slug: String,
    pub title: String,
}

/// Suggest recipes for a partial query within a scope.
///
/// Shares the free-text policy of the search endpoints: fewer than
/// [`MIN_QUERY_LEN`] characters after trimming yields an empty list, never an
/// error. Candidates are matched case-insensitively against primary-language
/// titles; prefix matches rank first, then closeness to the query
/// (Jaro-Winkler), then rating count, with the slug as the final tie-break.
pub async fn suggest(
    store: &StoreClient,
    scope: &ScopeFilter,
    query: &str,
    limit: usize,
) -> Result<Vec<Suggestion>> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }
    let limit = limit.clamp(1, MAX_SUGGESTIONS);

    let docs = store.scan_scope(scope).await?;
    let mut ranked: Vec<(bool, f64, u32, Suggestion)> = docs
        .iter()
        .filter_map(|doc| {
            let title = doc.title.primary();
            let lowered = title.to_lowercase();
            if !lowered.contains(&needle) {
                return None;
            }
            Some((
                lowered.starts_with(&needle),
                strsim::jaro_winkler(&lowered, &needle),
                doc.rating.count,
                Suggestion {
                    slug: doc.slug.clone(),
                    title: title.to_string(),
                },
            ))
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.total_cmp(&a.1))
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.3.slug.cmp(&b.3.slug))
    });

    Ok(ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, _, suggestion)| suggestion)
        .collect())
}
