/// SQL query functions for database operations
///
/// Single-row fetches return `Ok(None)` when nothing matches. Every other
/// failure comes back as `RecipeError::Database`. List queries read all rows
/// or none: a failure part way through discards what was read.

use crate::core::codec;
use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use sqlx::Row;
use tracing::debug;

/// Maximum number of previews returned by `fetch_recipe_previews`
pub const PREVIEW_LIMIT: i64 = 10;

impl Database {
    /// Get a recipe by ID
    ///
    /// # Returns
    /// * `Ok(Some(Recipe))` - lists split, published date formatted
    /// * `Ok(None)` - no recipe with that id
    /// * `Err(RecipeError)` - store failure or unreadable published date
    pub async fn fetch_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        debug!(id, "fetch recipe");
        let row = self
            .with_deadline(
                "fetch_recipe",
                sqlx::query_as::<_, RecipeRow>(
                    r#"
                    SELECT id, title, description, author_id, category_id, dificulty_id, rating,
                           preparation_time, serving, ingredients, steps, access_count, image,
                           published_date
                    FROM recipe WHERE id = ?
                    "#,
                )
                .bind(id)
                .fetch_optional(self.pool()),
            )
            .await?;

        row.map(Recipe::try_from).transpose()
    }

    /// Get an author by ID
    pub async fn fetch_author(&self, id: i64) -> Result<Option<RecipeAuthor>> {
        debug!(id, "fetch author");
        self.with_deadline(
            "fetch_author",
            sqlx::query_as::<_, RecipeAuthor>("SELECT id, name FROM author WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool()),
        )
        .await
    }

    /// Get a category by ID
    pub async fn fetch_category(&self, id: i64) -> Result<Option<RecipeCategory>> {
        debug!(id, "fetch category");
        self.with_deadline(
            "fetch_category",
            sqlx::query_as::<_, RecipeCategory>("SELECT id, name FROM category WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool()),
        )
        .await
    }

    /// Get a difficulty level by ID
    pub async fn fetch_difficulty(&self, id: i64) -> Result<Option<RecipeDifficulty>> {
        debug!(id, "fetch difficulty");
        self.with_deadline(
            "fetch_difficulty",
            sqlx::query_as::<_, RecipeDifficulty>("SELECT id, name FROM dificulty WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool()),
        )
        .await
    }

    /// Get up to `PREVIEW_LIMIT` previews
    ///
    /// No ORDER BY: rows come back in whatever order the engine picks.
    pub async fn fetch_recipe_previews(&self) -> Result<Vec<RecipePreview>> {
        let previews = self
            .with_deadline(
                "fetch_recipe_previews",
                sqlx::query_as::<_, RecipePreview>(
                    "SELECT id, title, description FROM recipe LIMIT ?",
                )
                .bind(PREVIEW_LIMIT)
                .fetch_all(self.pool()),
            )
            .await?;

        debug!(count = previews.len(), "fetched previews");
        Ok(previews)
    }

    /// Get every category
    pub async fn fetch_categories(&self) -> Result<Vec<RecipeCategory>> {
        self.with_deadline(
            "fetch_categories",
            sqlx::query_as::<_, RecipeCategory>("SELECT id, name FROM category")
                .fetch_all(self.pool()),
        )
        .await
    }

    /// Get every difficulty level
    pub async fn fetch_difficulties(&self) -> Result<Vec<RecipeDifficulty>> {
        self.with_deadline(
            "fetch_difficulties",
            sqlx::query_as::<_, RecipeDifficulty>("SELECT id, name FROM dificulty")
                .fetch_all(self.pool()),
        )
        .await
    }

    /// Insert a recipe
    ///
    /// # Returns
    /// * `Ok(i64)` - the new recipe ID
    /// * `Err(RecipeError::Validation)` - an ingredient or step is empty or contains '|'
    /// * `Err(RecipeError::Database)` - e.g. unknown author/category/difficulty
    pub async fn insert_recipe(&self, recipe: NewRecipe) -> Result<i64> {
        let ingredients = codec::join_list("ingredients", &recipe.ingredients)?;
        let steps = codec::join_list("steps", &recipe.steps)?;

        let row = self
            .with_deadline(
                "insert_recipe",
                sqlx::query(
                    r#"
                    INSERT INTO recipe (title, description, author_id, category_id, dificulty_id,
                                        preparation_time, serving, ingredients, steps, image)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&recipe.title)
                .bind(&recipe.description)
                .bind(recipe.author_id)
                .bind(recipe.category_id)
                .bind(recipe.difficulty_id)
                .bind(recipe.preparation_time)
                .bind(&recipe.serving)
                .bind(ingredients)
                .bind(steps)
                .bind(&recipe.image_url)
                .fetch_one(self.pool()),
            )
            .await?;

        let id: i64 = row.get(0);
        debug!(id, "inserted recipe");
        Ok(id)
    }

    /// Update title, description, preparation time, serving and image
    ///
    /// An id that matches nothing is not reported; the update just touches
    /// zero rows.
    pub async fn update_recipe(&self, id: i64, update: RecipeUpdate) -> Result<()> {
        let result = self
            .with_deadline(
                "update_recipe",
                sqlx::query(
                    r#"
                    UPDATE recipe
                    SET title = ?, description = ?, preparation_time = ?, serving = ?, image = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&update.title)
                .bind(&update.description)
                .bind(update.preparation_time)
                .bind(&update.serving)
                .bind(&update.image_url)
                .bind(id)
                .execute(self.pool()),
            )
            .await?;

        debug!(id, rows = result.rows_affected(), "updated recipe");
        Ok(())
    }

    /// Delete a recipe
    pub async fn remove_recipe(&self, id: i64) -> Result<()> {
        let result = self
            .with_deadline(
                "remove_recipe",
                sqlx::query("DELETE FROM recipe WHERE id = ?")
                    .bind(id)
                    .execute(self.pool()),
            )
            .await?;

        debug!(id, rows = result.rows_affected(), "removed recipe");
        Ok(())
    }
}
