use serde::Serialize;

use crate::types::RecipeDoc;

/// Default page size for listing pages.
pub const DEFAULT_LIMIT: usize = 12;
/// One page-size ceiling, applied consistently by every endpoint.
pub const MAX_LIMIT: usize = 24;

/// The enumerated sort orders. Unknown keys fall back to `newest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Publish timestamp descending (default).
    #[default]
    Newest,
    /// Average rating descending, rating count as tie-break.
    Rating,
    /// Total minutes ascending; recipes with unknown time sort last.
    Time,
    /// Rating count descending, average as tie-break.
    Popular,
    /// Primary-language title ascending.
    Alphabetical,
}

impl SortKey {
    pub fn parse(raw: Option<&str>) -> SortKey {
        match raw.map(str::trim) {
            Some("rating") => SortKey::Rating,
            Some("time") => SortKey::Time,
            Some("popular") => SortKey::Popular,
            Some("alphabetical") => SortKey::Alphabetical,
            // "newest", absent, and anything unrecognized
            _ => SortKey::Newest,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
            SortKey::Time => "time",
            SortKey::Popular => "popular",
            SortKey::Alphabetical => "alphabetical",
        }
    }
}

/// Lenient page-number parsing: anything unparseable or below 1 becomes 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|p| p.max(1) as usize)
        .unwrap_or(1)
}

/// Lenient page-size parsing, clamped to `[1, MAX_LIMIT]`.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|l| l.clamp(1, MAX_LIMIT as i64) as usize)
        .unwrap_or(DEFAULT_LIMIT)
}

/// Pagination metadata, shaped for the response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn compute(total: usize, page: usize, limit: usize) -> Pagination {
        let limit = limit.max(1);
        let page = page.max(1);
        Pagination {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_count: total,
            has_next_page: page * limit < total,
            has_prev_page: page > 1,
        }
    }
}

/// Sort the matched set in place, then slice out one page. Sorting is fully
/// deterministic: every order falls back to the slug as the final tie-break.
pub fn paginate(
    mut docs: Vec<RecipeDoc>,
    sort: SortKey,
    page: usize,
    limit: usize,
) -> (Vec<RecipeDoc>, Pagination) {
    let total = docs.len();
    let pagination = Pagination::compute(total, page, limit);
    sort_docs(&mut docs, sort);
    let items = docs
        .into_iter()
        .skip((pagination.current_page - 1) * limit.max(1))
        .take(limit.max(1))
        .collect();
    (items, pagination)
}

pub fn sort_docs(docs: &mut [RecipeDoc], sort: SortKey) {
    docs.sort_by(|a, b| {
        let ordering = match sort {
            SortKey::Newest => b
                .published_at
                .cmp(&a.published_at)
                .then_with(|| b.created_at.cmp(&a.created_at)),
            SortKey::Rating => b
                .rating
                .average
                .total_cmp(&a.rating.average)
                .then_with(|| b.rating.count.cmp(&a.rating.count)),
            SortKey::Time => effective_minutes(a).cmp(&effective_minutes(b)),
            SortKey::Popular => b
                .rating
                .count
                .cmp(&a.rating.count)
                .then_with(|| b.rating.average.total_cmp(&a.rating.average)),
            SortKey::Alphabetical => a
                .title
                .primary()
                .to_lowercase()
                .cmp(&b.title.primary().to_lowercase()),
        };
        ordering.then_with(|| a.slug.cmp(&b.slug))
    });
}

fn effective_minutes(doc: &RecipeDoc) -> u32 {
    match doc.total_time_minutes {
        Some(m) if m > 0 => m,
        _ => u32::MAX,
    }
}
