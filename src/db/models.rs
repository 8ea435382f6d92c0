/// Data models for database entities
///
/// Row types map 1:1 to table columns. `Recipe` is the decoded form handed to
/// callers, built from `RecipeRow`.

use crate::core::codec;
use crate::error::{RecipeError, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full recipe as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author_id: i64,
    pub category_id: i64,
    pub difficulty_id: i64,
    pub rating: f64,
    /// Minutes
    pub preparation_time: i32,
    pub serving: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub access_count: i64,
    pub image_url: String,
    /// Display format, e.g. "02/Jan/2021"
    pub published_date: String,
}

/// Raw `recipe` row, list columns still joined
#[derive(Debug, Clone, FromRow)]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author_id: i64,
    pub category_id: i64,
    #[sqlx(rename = "dificulty_id")]
    pub difficulty_id: i64,
    pub rating: f64,
    pub preparation_time: i32,
    pub serving: String,
    pub ingredients: String, // '|' separated
    pub steps: String,       // '|' separated
    pub access_count: i64,
    #[sqlx(rename = "image")]
    pub image_url: String,
    pub published_date: String, // timestamp text from SQLite
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = RecipeError;

    fn try_from(row: RecipeRow) -> Result<Self> {
        Ok(Recipe {
            published_date: codec::format_published_date(&row.published_date)?,
            ingredients: codec::split_list(&row.ingredients),
            steps: codec::split_list(&row.steps),
            id: row.id,
            title: row.title,
            description: row.description,
            author_id: row.author_id,
            category_id: row.category_id,
            difficulty_id: row.difficulty_id,
            rating: row.rating,
            preparation_time: row.preparation_time,
            serving: row.serving,
            access_count: row.access_count,
            image_url: row.image_url,
        })
    }
}

/// Reduced recipe for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipePreview {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeAuthor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeCategory {
    pub id: i64,
    pub name: String,
}

/// Row of the `dificulty` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeDifficulty {
    pub id: i64,
    pub name: String,
}

/// Input for inserting a recipe
///
/// Rating, access count and published date are left to column defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub author_id: i64,
    pub category_id: i64,
    pub difficulty_id: i64,
    pub preparation_time: i32,
    pub serving: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_url: String,
}

/// Fields an update is allowed to change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: String,
    pub description: String,
    pub preparation_time: i32,
    pub serving: String,
    pub image_url: String,
}

/// A recipe with its lookup references resolved
///
/// Lookups are optional because the store does not promise the referenced
/// rows still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub author: Option<RecipeAuthor>,
    pub category: Option<RecipeCategory>,
    pub difficulty: Option<RecipeDifficulty>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RecipeRow {
        RecipeRow {
            id: 7,
            title: "Pancakes".to_string(),
            description: "Fluffy".to_string(),
            author_id: 2,
            category_id: 1,
            difficulty_id: 1,
            rating: 4.5,
            preparation_time: 20,
            serving: "4 people".to_string(),
            ingredients: "eggs|flour|milk".to_string(),
            steps: "mix|fry".to_string(),
            access_count: 3,
            image_url: "https://img.example/pancakes.jpg".to_string(),
            published_date: "2021-01-02T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_row_decodes_lists_and_date() {
        let recipe = Recipe::try_from(sample_row()).unwrap();

        assert_eq!(recipe.ingredients, vec!["eggs", "flour", "milk"]);
        assert_eq!(recipe.steps, vec!["mix", "fry"]);
        assert_eq!(recipe.published_date, "02/Jan/2021");
        assert_eq!(recipe.image_url, "https://img.example/pancakes.jpg");
    }

    #[test]
    fn test_row_with_bad_date_fails() {
        let mut row = sample_row();
        row.published_date = "not a date".to_string();

        assert!(matches!(
            Recipe::try_from(row),
            Err(RecipeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_recipe_serializes_lists_as_arrays() {
        let recipe = Recipe::try_from(sample_row()).unwrap();
        let json = serde_json::to_value(&recipe).unwrap();

        assert_eq!(json["ingredients"][1], "flour");
        assert_eq!(json["published_date"], "02/Jan/2021");
    }
}
