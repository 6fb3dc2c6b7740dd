//! Driving port for recipe mutations.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId};

/// Domain use-case port for creating, replacing and deleting recipes.
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Store a new recipe.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Replace an existing recipe; `not_found` when the id is unknown.
    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Delete a recipe; `not_found` when the id is unknown.
    async fn delete(&self, id: RecipeId) -> Result<(), Error>;
}
