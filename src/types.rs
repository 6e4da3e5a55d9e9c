use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::query::time_bucket::TimeBucket;

/// Recipe identifier — a URL-safe slug, unique and immutable once published.
pub type Slug = String;

/// Primary site language and the ultimate fallback for every localized field.
pub const DEFAULT_LANGUAGE: &str = "lt";

/// A language-code → text mapping. `lt` is guaranteed present by ingestion
/// and serves as the fallback for every other language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(pub BTreeMap<String, String>);

impl Localized {
    /// Build a value with only the primary (`lt`) variant.
    pub fn new(lt: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(DEFAULT_LANGUAGE.to_string(), lt.into());
        Localized(map)
    }

    pub fn with(mut self, language: &str, text: impl Into<String>) -> Self {
        self.0.insert(language.to_string(), text.into());
        self
    }

    /// Resolve to the requested language, falling back to `lt`, then `""`.
    pub fn resolve(&self, language: &str) -> &str {
        self.0
            .get(language)
            .or_else(|| self.0.get(DEFAULT_LANGUAGE))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The primary-language (`lt`) variant.
    pub fn primary(&self) -> &str {
        self.resolve(DEFAULT_LANGUAGE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// A stored recipe document, read per-request by the query layer.
///
/// Created and updated by an external ingestion process; the query core never
/// mutates it apart from the idempotent derived-bucket refresh
/// ([`crate::StoreClient::refresh_time_buckets`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDoc {
    pub slug: Slug,
    pub title: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Total cook time in minutes. Absent or zero means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_minutes: Option<u32>,
    /// Stored derived bucket. Read paths never trust this copy — the bucket
    /// is always recomputed from `total_time_minutes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_bucket: Option<TimeBucket>,
    /// Every category and subcategory path this recipe belongs to,
    /// slash-delimited (`"vistiena/krutinele"`). A recipe may hold many.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Free-form lowercase tags.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub main_ingredient: Vec<String>,
    #[serde(default)]
    pub meal_type: Vec<String>,
    #[serde(default)]
    pub rating: Rating,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RecipeDoc {
    /// The bucket this recipe classifies into, recomputed from the raw
    /// minutes value. Never reads the stored `time_bucket` copy.
    pub fn current_bucket(&self) -> TimeBucket {
        TimeBucket::classify(self.total_time_minutes.map(i64::from))
    }
}

/// The fixed anchor of a listing page. Always enforced; user filters can
/// narrow within it but never escape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    /// No anchor, the site-wide search page.
    All,
    /// A category or subcategory path (`"vistiena"`, `"vistiena/krutinele"`).
    /// Matches recipes in the path itself or any of its descendants.
    Category(String),
    /// A tag page (`"tag:greita"` on the wire).
    Tag(String),
}

impl ScopeFilter {
    /// Parse the wire form. Lenient: whatever does not look like a tag scope
    /// is treated as a category path; an unknown path simply matches nothing.
    pub fn parse(raw: &str) -> ScopeFilter {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return ScopeFilter::All;
        }
        if let Some(tag) = trimmed.strip_prefix("tag:") {
            let tag = tag.trim();
            if tag.is_empty() {
                return ScopeFilter::All;
            }
            return ScopeFilter::Tag(tag.to_lowercase());
        }
        ScopeFilter::Category(trimmed.to_lowercase())
    }

    pub fn matches(&self, doc: &RecipeDoc) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Category(path) => doc
                .categories
                .iter()
                .any(|c| c == path || c.starts_with(path.as_str()) && c[path.len()..].starts_with('/')),
            ScopeFilter::Tag(tag) => doc.tags.iter().any(|t| t == tag),
        }
    }

    /// Wire form, as echoed back in responses.
    pub fn as_wire(&self) -> String {
        match self {
            ScopeFilter::All => String::new(),
            ScopeFilter::Category(path) => path.clone(),
            ScopeFilter::Tag(tag) => format!("tag:{}", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(slug: &str, categories: Vec<&str>) -> RecipeDoc {
        RecipeDoc {
            slug: slug.to_string(),
            title: Localized::new(slug),
            description: Localized::default(),
            ingredients: vec![],
            total_time_minutes: None,
            time_bucket: None,
            categories: categories.into_iter().map(String::from).collect(),
            tags: vec![],
            dietary: vec![],
            cuisine: vec![],
            main_ingredient: vec![],
            meal_type: vec![],
            rating: Rating::default(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            created_at: None,
        }
    }

    // ── Localized ───────────────────────────────────────────────────────

    #[test]
    fn resolve_requested_language() {
        let l = Localized::new("Vištiena").with("en", "Chicken");
        assert_eq!(l.resolve("en"), "Chicken");
    }

    #[test]
    fn resolve_falls_back_to_lt() {
        let l = Localized::new("Vištiena");
        assert_eq!(l.resolve("en"), "Vištiena");
    }

    #[test]
    fn resolve_empty_when_nothing_present() {
        let l = Localized::default();
        assert_eq!(l.resolve("en"), "");
    }

    #[test]
    fn primary_is_lt() {
        let l = Localized::new("Vištiena").with("en", "Chicken");
        assert_eq!(l.primary(), "Vištiena");
    }

    #[test]
    fn localized_serializes_as_plain_map() {
        let l = Localized::new("Sriuba").with("en", "Soup");
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json, serde_json::json!({"en": "Soup", "lt": "Sriuba"}));
    }

    // ── ScopeFilter::parse ──────────────────────────────────────────────

    #[test]
    fn parse_empty_scope_is_all() {
        assert_eq!(ScopeFilter::parse(""), ScopeFilter::All);
        assert_eq!(ScopeFilter::parse("  "), ScopeFilter::All);
        assert_eq!(ScopeFilter::parse("/"), ScopeFilter::All);
    }

    #[test]
    fn parse_category_path() {
        assert_eq!(
            ScopeFilter::parse("vistiena/krutinele"),
            ScopeFilter::Category("vistiena/krutinele".into())
        );
    }

    #[test]
    fn parse_strips_surrounding_slashes() {
        assert_eq!(
            ScopeFilter::parse("/vistiena/"),
            ScopeFilter::Category("vistiena".into())
        );
    }

    #[test]
    fn parse_tag_scope() {
        assert_eq!(
            ScopeFilter::parse("tag:greita"),
            ScopeFilter::Tag("greita".into())
        );
    }

    #[test]
    fn parse_empty_tag_is_all() {
        assert_eq!(ScopeFilter::parse("tag:"), ScopeFilter::All);
    }

    #[test]
    fn parse_lowercases() {
        assert_eq!(
            ScopeFilter::parse("Vistiena"),
            ScopeFilter::Category("vistiena".into())
        );
    }

    // ── ScopeFilter::matches ────────────────────────────────────────────

    #[test]
    fn category_scope_matches_exact_path() {
        let d = doc("r1", vec!["vistiena/krutinele"]);
        assert!(ScopeFilter::Category("vistiena/krutinele".into()).matches(&d));
    }

    #[test]
    fn category_scope_matches_descendants() {
        let d = doc("r1", vec!["vistiena/krutinele"]);
        assert!(ScopeFilter::Category("vistiena".into()).matches(&d));
    }

    #[test]
    fn category_scope_rejects_prefix_of_longer_segment() {
        // "vist" is not a parent of "vistiena", segment boundaries matter
        let d = doc("r1", vec!["vistiena"]);
        assert!(!ScopeFilter::Category("vist".into()).matches(&d));
    }

    #[test]
    fn category_scope_rejects_other_category() {
        let d = doc("r1", vec!["jautiena"]);
        assert!(!ScopeFilter::Category("vistiena".into()).matches(&d));
    }

    #[test]
    fn tag_scope_matches_tag() {
        let mut d = doc("r1", vec![]);
        d.tags = vec!["greita".into()];
        assert!(ScopeFilter::Tag("greita".into()).matches(&d));
        assert!(!ScopeFilter::Tag("lengva".into()).matches(&d));
    }

    #[test]
    fn all_scope_matches_everything() {
        let d = doc("r1", vec![]);
        assert!(ScopeFilter::All.matches(&d));
    }

    // ── RecipeDoc serde ─────────────────────────────────────────────────

    #[test]
    fn recipe_doc_roundtrip() {
        let mut d = doc("cepelinai", vec!["bulviu-patiekalai"]);
        d.total_time_minutes = Some(90);
        d.dietary = vec!["be-gliuteno".into()];
        let json = serde_json::to_string(&d).unwrap();
        let back: RecipeDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn recipe_doc_camel_case_wire_names() {
        let mut d = doc("r1", vec![]);
        d.total_time_minutes = Some(25);
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("totalTimeMinutes").is_some());
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("mainIngredient").is_some());
    }

    #[test]
    fn recipe_doc_minimal_json_parses() {
        // Ingestion may omit everything but slug, title, publishedAt
        let json = serde_json::json!({
            "slug": "sriuba",
            "title": {"lt": "Sriuba"},
            "publishedAt": "2024-03-01T10:00:00Z"
        });
        let d: RecipeDoc = serde_json::from_value(json).unwrap();
        assert_eq!(d.slug, "sriuba");
        assert!(d.total_time_minutes.is_none());
        assert!(d.categories.is_empty());
    }

    // ── current_bucket ──────────────────────────────────────────────────

    #[test]
    fn current_bucket_ignores_stale_stored_copy() {
        let mut d = doc("r1", vec![]);
        d.total_time_minutes = Some(20);
        d.time_bucket = Some(TimeBucket::Over2h); // stale
        assert_eq!(d.current_bucket(), TimeBucket::UpTo30);
    }
}
