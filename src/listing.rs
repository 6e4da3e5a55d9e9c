use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::store::StoreClient;
use crate::error::Result;
use crate::query::dimension::Dimension;
use crate::query::facets::{facet_groups, FacetGroup};
use crate::query::filter::Predicate;
use crate::query::page::{parse_limit, parse_page, Pagination, SortKey};
use crate::query::project::ProjectedRecipe;
use crate::query::tokens::parse_filter_tokens;
use crate::types::{ScopeFilter, DEFAULT_LANGUAGE};

/// Raw request inputs, exactly as the HTTP layer received them. Every field
/// is normalized leniently here: a bad value degrades to its default, it
/// never fails the request.
#[derive(Debug, Clone, Default)]
pub struct ListingParams {
    pub scope: String,
    pub filters: Option<String>,
    pub query: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub language: Option<String>,
}

/// The assembled listing response: one page of projected recipes, its
/// pagination metadata, the scope-level facet groups, and the echoed
/// selection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOutcome {
    pub recipes: Vec<ProjectedRecipe>,
    pub pagination: Pagination,
    pub available_filters: IndexMap<&'static str, FacetGroup>,
    pub applied_filters: IndexMap<&'static str, Vec<String>>,
    pub scope: String,
    pub sort: &'static str,
}

/// Run one listing request: parse the filter expression, compile the
/// predicate, issue the facet aggregation and the page query concurrently,
/// and assemble the response.
///
/// The facet aggregation deliberately sees the scope anchor only, never the
/// user's current selection, so every option keeps an accurate count after
/// selections are made elsewhere. Either round-trip failing fails the whole
/// request; no partial response is ever produced.
pub async fn run_listing(store: &StoreClient, params: ListingParams) -> Result<ListingOutcome> {
    let scope = ScopeFilter::parse(&params.scope);
    let selection = parse_filter_tokens(params.filters.as_deref().unwrap_or(""));
    let predicate = Predicate::build(&scope, &selection, params.query.as_deref());

    let page = parse_page(params.page.as_deref());
    let limit = parse_limit(params.limit.as_deref());
    let sort = SortKey::parse(params.sort.as_deref());
    let language = params
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_lowercase();

    let started = std::time::Instant::now();
    let (counts, page_result) = tokio::join!(
        store.count_scope_facets(&scope, &Dimension::ALL),
        store.fetch_page(&predicate, sort, page, limit),
    );
    let counts = counts?;
    let (docs, pagination) = page_result?;
    tracing::debug!(
        scope = %scope.as_wire(),
        total = pagination.total_count,
        elapsed = ?started.elapsed(),
        "listing query"
    );

    let recipes = docs
        .iter()
        .map(|doc| ProjectedRecipe::project(doc, &language))
        .collect();

    Ok(ListingOutcome {
        recipes,
        pagination,
        available_filters: facet_groups(&counts, &selection),
        applied_filters: selection.to_applied(),
        scope: scope.as_wire(),
        sort: sort.key(),
    })
}
