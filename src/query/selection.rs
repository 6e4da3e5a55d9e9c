use indexmap::{IndexMap, IndexSet};

use crate::query::dimension::Dimension;

/// The user's resolved facet selection: dimension → chosen value keys.
///
/// Two invariants hold at all times:
/// - a dimension never maps to an empty set — the key is removed together
///   with its last value, so "no constraint" is always expressed by absence;
/// - single-selection dimensions hold exactly one value — selecting a new
///   value replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    entries: IndexMap<Dimension, IndexSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        FilterSelection::default()
    }

    /// Add a value. On a single-selection dimension this replaces any
    /// previous value. Empty values are ignored.
    pub fn select(&mut self, dimension: Dimension, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        let values = self.entries.entry(dimension).or_default();
        if dimension.is_single_select() {
            values.clear();
        }
        values.insert(value);
    }

    /// Remove a value; drops the dimension key entirely when its selection
    /// becomes empty.
    pub fn deselect(&mut self, dimension: Dimension, value: &str) {
        if let Some(values) = self.entries.get_mut(&dimension) {
            values.shift_remove(value);
            if values.is_empty() {
                self.entries.shift_remove(&dimension);
            }
        }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.entries
            .get(&dimension)
            .is_some_and(|values| values.contains(value))
    }

    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        self.entries.contains_key(&dimension)
    }

    pub fn values(&self, dimension: Dimension) -> Option<&IndexSet<String>> {
        self.entries.get(&dimension)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &IndexSet<String>)> {
        self.entries.iter().map(|(d, v)| (*d, v))
    }

    /// Canonical wire form: `dim:v1,v2` groups joined by top-level commas.
    /// [`crate::query::tokens::parse_filter_tokens`] is the exact inverse.
    pub fn serialize(&self) -> String {
        let mut groups = Vec::with_capacity(self.entries.len());
        for (dimension, values) in &self.entries {
            let joined: Vec<&str> = values.iter().map(String::as_str).collect();
            groups.push(format!("{}:{}", dimension.key(), joined.join(",")));
        }
        groups.join(",")
    }

    /// Echo shape for the `appliedFilters` response field.
    pub fn to_applied(&self) -> IndexMap<&'static str, Vec<String>> {
        self.entries
            .iter()
            .map(|(d, values)| (d.key(), values.iter().cloned().collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── single-selection invariant ──────────────────────────────────────

    #[test]
    fn single_select_replaces_previous_value() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::MainIngredient, "vistiena");
        sel.select(Dimension::MainIngredient, "jautiena");
        let values = sel.values(Dimension::MainIngredient).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains("jautiena"));
        assert!(!values.contains("vistiena"));
    }

    #[test]
    fn time_required_is_single_select() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::TimeRequired, "15min");
        sel.select(Dimension::TimeRequired, "1h");
        assert_eq!(sel.values(Dimension::TimeRequired).unwrap().len(), 1);
        assert!(sel.contains(Dimension::TimeRequired, "1h"));
    }

    #[test]
    fn multi_select_accumulates() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "vegan");
        sel.select(Dimension::Dietary, "be-gliuteno");
        assert_eq!(sel.values(Dimension::Dietary).unwrap().len(), 2);
    }

    #[test]
    fn duplicate_select_is_noop() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "vegan");
        sel.select(Dimension::Dietary, "vegan");
        assert_eq!(sel.values(Dimension::Dietary).unwrap().len(), 1);
    }

    // ── empty-selection pruning ─────────────────────────────────────────

    #[test]
    fn removing_last_value_removes_dimension_key() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "vegan");
        sel.deselect(Dimension::Dietary, "vegan");
        assert!(!sel.has_dimension(Dimension::Dietary));
        assert!(sel.is_empty());
    }

    #[test]
    fn removing_one_of_two_keeps_dimension() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "vegan");
        sel.select(Dimension::Dietary, "be-gliuteno");
        sel.deselect(Dimension::Dietary, "vegan");
        assert!(sel.has_dimension(Dimension::Dietary));
        assert_eq!(sel.values(Dimension::Dietary).unwrap().len(), 1);
    }

    #[test]
    fn deselect_unknown_value_is_noop() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "vegan");
        sel.deselect(Dimension::Dietary, "keto");
        sel.deselect(Dimension::Cuisine, "italu");
        assert!(sel.has_dimension(Dimension::Dietary));
    }

    #[test]
    fn empty_value_is_ignored() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::Dietary, "");
        assert!(sel.is_empty());
    }

    // ── serialize ───────────────────────────────────────────────────────

    #[test]
    fn serialize_groups_values_per_dimension() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::TimeRequired, "30min");
        sel.select(Dimension::Dietary, "vegan");
        sel.select(Dimension::Dietary, "be-gliuteno");
        assert_eq!(
            sel.serialize(),
            "timeRequired:30min,dietary:vegan,be-gliuteno"
        );
    }

    #[test]
    fn serialize_empty_selection_is_empty_string() {
        assert_eq!(FilterSelection::new().serialize(), "");
    }

    // ── to_applied ──────────────────────────────────────────────────────

    #[test]
    fn applied_echo_uses_wire_keys() {
        let mut sel = FilterSelection::new();
        sel.select(Dimension::MainIngredient, "jautiena");
        let applied = sel.to_applied();
        assert_eq!(applied["mainIngredient"], vec!["jautiena".to_string()]);
    }
}
