use crate::query::dimension::Dimension;
use crate::query::selection::FilterSelection;
use crate::query::time_bucket::TimeBucket;
use crate::types::{RecipeDoc, ScopeFilter};

/// Minimum free-text query length after trimming. Anything shorter is
/// treated as no text constraint, matching the suggestion endpoints.
pub const MIN_QUERY_LEN: usize = 2;
/// Free-text queries are truncated to this many characters, never rejected.
pub const MAX_QUERY_LEN: usize = 150;

/// A compiled document predicate: the page scope AND'ed with the user's
/// facet selection and optional free-text terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The page anchor. Always present, can never be removed by user input.
    Scope(ScopeFilter),
    /// Single-selection time constraint. Matching is classification
    /// equality, the exact inverse of [`TimeBucket::classify`] including
    /// its unknown `2h` arm, so filtered results and facet counts share one
    /// definition of every bucket.
    Bucket(TimeBucket),
    /// Multi-selection facet constraint: the document's values for the
    /// dimension intersect the selected set.
    AnyOf {
        dimension: Dimension,
        values: Vec<String>,
    },
    /// Normalized free-text terms; every term must match title, description,
    /// or tags in the primary language.
    Text(Vec<String>),
    And(Vec<Predicate>),
}

impl Predicate {
    /// Compile the request inputs into one predicate.
    pub fn build(
        scope: &ScopeFilter,
        selection: &FilterSelection,
        free_text: Option<&str>,
    ) -> Predicate {
        let mut parts = vec![Predicate::Scope(scope.clone())];

        for (dimension, values) in selection.iter() {
            match dimension {
                Dimension::TimeRequired => {
                    // Single-selection: at most one value by invariant.
                    // An unrecognized bucket key constrains nothing.
                    if let Some(bucket) = values.iter().next().and_then(|k| TimeBucket::from_key(k))
                    {
                        parts.push(Predicate::Bucket(bucket));
                    }
                }
                _ => {
                    parts.push(Predicate::AnyOf {
                        dimension,
                        values: values.iter().cloned().collect(),
                    });
                }
            }
        }

        if let Some(terms) = free_text.and_then(normalize_query) {
            parts.push(Predicate::Text(terms));
        }

        Predicate::And(parts)
    }

    pub fn matches(&self, doc: &RecipeDoc) -> bool {
        match self {
            Predicate::Scope(scope) => scope.matches(doc),
            Predicate::Bucket(bucket) => doc.current_bucket() == *bucket,
            Predicate::AnyOf { dimension, values } => dimension
                .values_of(doc)
                .iter()
                .any(|v| values.iter().any(|selected| selected == v)),
            Predicate::Text(terms) => {
                let haystack = text_haystack(doc);
                terms.iter().all(|term| haystack.contains(term.as_str()))
            }
            Predicate::And(parts) => parts.iter().all(|p| p.matches(doc)),
        }
    }
}

/// Normalize a raw free-text query: trim, cap at [`MAX_QUERY_LEN`]
/// characters, lowercase, split into terms. Returns `None` when the result
/// is shorter than [`MIN_QUERY_LEN`] — a one-character query behaves exactly
/// like no query at all.
pub fn normalize_query(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    let capped: String = trimmed.chars().take(MAX_QUERY_LEN).collect();
    if capped.chars().count() < MIN_QUERY_LEN {
        return None;
    }
    let terms: Vec<String> = capped
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Primary-language searchable text: title, description, and tags.
fn text_haystack(doc: &RecipeDoc) -> String {
    let mut haystack = String::new();
    haystack.push_str(&doc.title.primary().to_lowercase());
    haystack.push(' ');
    haystack.push_str(&doc.description.primary().to_lowercase());
    for tag in &doc.tags {
        haystack.push(' ');
        haystack.push_str(&tag.to_lowercase());
    }
    haystack
}
