// Turns form fields into typed store inputs.
//
// Field names match the HTML form the catalog is edited through. Numeric
// fields must parse; an empty or garbled number is a validation error, never 0.

use crate::core::codec;
use crate::db::{NewRecipe, RecipeUpdate};
use crate::error::{RecipeError, Result};
use serde::{Deserialize, Serialize};

/// Author recorded for recipes submitted without one
pub const DEFAULT_AUTHOR_ID: i64 = 2;

/// Raw form submission. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub difficulty: String,
    #[serde(rename = "preparation-time")]
    pub preparation_time: String,
    pub serving: String,
    /// '|' separated
    pub ingredients: String,
    /// '|' separated
    pub steps: String,
    #[serde(rename = "imgURL")]
    pub image_url: String,
}

impl RecipeForm {
    /// Validate the fields an insert needs
    pub fn into_new_recipe(self) -> Result<NewRecipe> {
        let author_id = if self.author.trim().is_empty() {
            DEFAULT_AUTHOR_ID
        } else {
            parse_number("author", &self.author)?
        };

        Ok(NewRecipe {
            category_id: parse_number("category", &self.category)?,
            difficulty_id: parse_number("difficulty", &self.difficulty)?,
            preparation_time: parse_number("preparation-time", &self.preparation_time)?,
            author_id,
            ingredients: codec::split_list(&self.ingredients),
            steps: codec::split_list(&self.steps),
            title: self.title,
            description: self.description,
            serving: self.serving,
            image_url: self.image_url,
        })
    }

    /// Validate the fields an update touches; the rest are ignored
    pub fn into_update(self) -> Result<RecipeUpdate> {
        Ok(RecipeUpdate {
            preparation_time: parse_number("preparation-time", &self.preparation_time)?,
            title: self.title,
            description: self.description,
            serving: self.serving,
            image_url: self.image_url,
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecipeError::validation(field, "a number is required"));
    }
    trimmed
        .parse()
        .map_err(|_| RecipeError::validation(field, format!("'{}' is not a whole number", raw)))
}
