use indexmap::IndexMap;
use serde::Serialize;

use crate::query::dimension::Dimension;
use crate::query::selection::FilterSelection;
use crate::query::time_bucket::TimeBucket;
use crate::types::RecipeDoc;

/// Raw per-dimension value counts over a scope-anchored document set.
#[derive(Debug, Clone, Default)]
pub struct FacetCounts {
    counts: IndexMap<Dimension, IndexMap<String, u64>>,
}

impl FacetCounts {
    pub fn get(&self, dimension: Dimension, value: &str) -> u64 {
        self.counts
            .get(&dimension)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    pub fn dimension_len(&self, dimension: Dimension) -> usize {
        self.counts.get(&dimension).map_or(0, IndexMap::len)
    }
}

/// Count facet values for every requested dimension in one pass.
///
/// The caller passes the scope-anchored documents only, never the user's
/// currently filtered set, so every option keeps showing how many results
/// it would yield regardless of selections made elsewhere.
pub fn count_facets<'a, I>(docs: I, dimensions: &[Dimension]) -> FacetCounts
where
    I: IntoIterator<Item = &'a RecipeDoc>,
{
    let mut counts = FacetCounts::default();
    for dimension in dimensions {
        counts.counts.entry(*dimension).or_default();
    }
    for doc in docs {
        for (dimension, values) in counts.counts.iter_mut() {
            for value in dimension.values_of(doc) {
                *values.entry(value).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// One choosable facet value, as returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption {
    pub key: String,
    pub label: String,
    pub count: u64,
    pub active: bool,
}

/// One filter group of the `availableFilters` response field.
#[derive(Debug, Clone, Serialize)]
pub struct FacetGroup {
    pub label: &'static str,
    pub order: u8,
    pub options: Vec<FacetOption>,
}

/// Assemble the `availableFilters` groups: zero-count options are gone by
/// construction (only present values were counted), options are ordered by
/// count descending with a deterministic tie-break (declared bucket order
/// for time, value key otherwise), and `active` reflects the current
/// selection. Dimensions with no options are omitted entirely.
pub fn facet_groups(
    counts: &FacetCounts,
    selection: &FilterSelection,
) -> IndexMap<&'static str, FacetGroup> {
    let mut groups = IndexMap::new();
    for dimension in Dimension::ALL {
        let Some(values) = counts.counts.get(&dimension) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }

        let mut options: Vec<FacetOption> = values
            .iter()
            .map(|(key, count)| FacetOption {
                key: key.clone(),
                label: dimension.value_label(key),
                count: *count,
                active: selection.contains(dimension, key),
            })
            .collect();

        options.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| tie_break(dimension, &a.key, &b.key))
        });

        groups.insert(
            dimension.key(),
            FacetGroup {
                label: dimension.label(),
                order: dimension.order(),
                options,
            },
        );
    }
    groups
}

fn tie_break(dimension: Dimension, a: &str, b: &str) -> std::cmp::Ordering {
    if dimension == Dimension::TimeRequired {
        let pos = |key: &str| TimeBucket::from_key(key).map_or(usize::MAX, |b| b.position());
        pos(a).cmp(&pos(b))
    } else {
        a.cmp(b)
    }
}
