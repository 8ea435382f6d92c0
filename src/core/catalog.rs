/// Recipe catalog
///
/// What a request handler talks to: store calls composed into the shapes a
/// page needs, and form submissions validated before they reach the store.

use crate::core::RecipeForm;
use crate::db::{
    Database, RecipeCategory, RecipeDetails, RecipeDifficulty, RecipePreview,
};
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

pub struct RecipeCatalog {
    db: Arc<Database>,
}

impl RecipeCatalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// A recipe with author, category and difficulty looked up
    ///
    /// `Ok(None)` only when the recipe itself is missing.
    pub async fn recipe_details(&self, id: i64) -> Result<Option<RecipeDetails>> {
        let Some(recipe) = self.db.fetch_recipe(id).await? else {
            return Ok(None);
        };

        let author = self.db.fetch_author(recipe.author_id).await?;
        let category = self.db.fetch_category(recipe.category_id).await?;
        let difficulty = self.db.fetch_difficulty(recipe.difficulty_id).await?;

        Ok(Some(RecipeDetails {
            recipe,
            author,
            category,
            difficulty,
        }))
    }

    pub async fn previews(&self) -> Result<Vec<RecipePreview>> {
        self.db.fetch_recipe_previews().await
    }

    pub async fn categories(&self) -> Result<Vec<RecipeCategory>> {
        self.db.fetch_categories().await
    }

    pub async fn difficulties(&self) -> Result<Vec<RecipeDifficulty>> {
        self.db.fetch_difficulties().await
    }

    /// Validate a submitted form and insert it
    pub async fn create_from_form(&self, form: RecipeForm) -> Result<i64> {
        let recipe = form.into_new_recipe()?;
        let id = self.db.insert_recipe(recipe).await?;
        info!(id, "recipe created");
        Ok(id)
    }

    /// Validate a submitted form and apply it to recipe `id`
    pub async fn update_from_form(&self, id: i64, form: RecipeForm) -> Result<()> {
        let update = form.into_update()?;
        self.db.update_recipe(id, update).await?;
        info!(id, "recipe updated");
        Ok(())
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.db.remove_recipe(id).await?;
        info!(id, "recipe removed");
        Ok(())
    }
}
