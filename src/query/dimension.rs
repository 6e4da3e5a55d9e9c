use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

use crate::query::time_bucket::TimeBucket;
use crate::types::RecipeDoc;

/// The closed set of filterable facet dimensions.
///
/// Each wire key maps through this enum to the document field it reads, so an
/// unsupported dimension is a parse-time skip — never a silently-wrong
/// dynamic field reference. The single-selection set is declared here, once,
/// and consumed by the parser, the selection state, and the query builder
/// alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    TimeRequired,
    Dietary,
    Cuisine,
    MainIngredient,
    MealType,
    CustomTags,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 6] = [
        Dimension::TimeRequired,
        Dimension::Dietary,
        Dimension::Cuisine,
        Dimension::MainIngredient,
        Dimension::MealType,
        Dimension::CustomTags,
    ];

    /// Wire key, as used in filter expressions and response maps.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::TimeRequired => "timeRequired",
            Dimension::Dietary => "dietary",
            Dimension::Cuisine => "cuisine",
            Dimension::MainIngredient => "mainIngredient",
            Dimension::MealType => "mealType",
            Dimension::CustomTags => "customTags",
        }
    }

    /// Resolve a wire key. Unknown keys return `None` and are skipped by the
    /// token parser (forward compatibility).
    pub fn from_key(key: &str) -> Option<Dimension> {
        Dimension::ALL.iter().copied().find(|d| d.key() == key)
    }

    /// Lithuanian display label for the filter group.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::TimeRequired => "Gaminimo laikas",
            Dimension::Dietary => "Mityba",
            Dimension::Cuisine => "Virtuvė",
            Dimension::MainIngredient => "Pagrindinis ingredientas",
            Dimension::MealType => "Patiekalo tipas",
            Dimension::CustomTags => "Žymos",
        }
    }

    /// Display order of the filter group.
    pub fn order(&self) -> u8 {
        Dimension::ALL.iter().position(|d| d == self).unwrap_or(0) as u8
    }

    /// Whether selecting a new value replaces the previous one instead of
    /// adding to the set. Declared here only; endpoints must not carry
    /// their own copies of this list.
    pub fn is_single_select(&self) -> bool {
        matches!(self, Dimension::TimeRequired | Dimension::MainIngredient)
    }

    /// The candidate facet values a document contributes to this dimension.
    /// Time is recomputed from raw minutes, never read from the stored copy.
    pub fn values_of(&self, doc: &RecipeDoc) -> Vec<String> {
        match self {
            Dimension::TimeRequired => vec![doc.current_bucket().key().to_string()],
            Dimension::Dietary => doc.dietary.clone(),
            Dimension::Cuisine => doc.cuisine.clone(),
            Dimension::MainIngredient => doc.main_ingredient.clone(),
            Dimension::MealType => doc.meal_type.clone(),
            Dimension::CustomTags => doc.tags.clone(),
        }
    }

    /// Display label for one facet value of this dimension. Buckets have
    /// fixed labels; open-valued facets are humanized from their key.
    pub fn value_label(&self, key: &str) -> String {
        if let Dimension::TimeRequired = self {
            if let Some(bucket) = TimeBucket::from_key(key) {
                return bucket.label().to_string();
            }
        }
        let spaced = key.replace('-', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Dimension::from_key(&key)
            .ok_or_else(|| de::Error::custom(format!("unknown filter dimension: {}", key)))
    }
}
