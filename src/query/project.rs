use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Rating, RecipeDoc};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// A recipe resolved to one display language, ready for UI consumption.
///
/// Every multilingual field is collapsed to `field[language] → field["lt"]
/// → ""`; numeric and structural fields pass through unchanged. The `time
/// required` key is recomputed from the raw minutes value, never read from
/// the stored derived copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedRecipe {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<ProjectedIngredient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_minutes: Option<u32>,
    pub time_required: &'static str,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub dietary: Vec<String>,
    pub cuisine: Vec<String>,
    pub main_ingredient: Vec<String>,
    pub meal_type: Vec<String>,
    pub rating: Rating,
    pub published_at: DateTime<Utc>,
    pub language: String,
}

impl ProjectedRecipe {
    pub fn project(doc: &RecipeDoc, language: &str) -> ProjectedRecipe {
        ProjectedRecipe {
            slug: doc.slug.clone(),
            title: doc.title.resolve(language).to_string(),
            description: doc.description.resolve(language).to_string(),
            ingredients: doc
                .ingredients
                .iter()
                .map(|i| ProjectedIngredient {
                    name: i.name.resolve(language).to_string(),
                    quantity: i.quantity.clone(),
                })
                .collect(),
            total_time_minutes: doc.total_time_minutes,
            time_required: doc.current_bucket().key(),
            categories: doc.categories.clone(),
            tags: doc.tags.clone(),
            dietary: doc.dietary.clone(),
            cuisine: doc.cuisine.clone(),
            main_ingredient: doc.main_ingredient.clone(),
            meal_type: doc.meal_type.clone(),
            rating: doc.rating,
            published_at: doc.published_at,
            language: language.to_string(),
        }
    }
}
