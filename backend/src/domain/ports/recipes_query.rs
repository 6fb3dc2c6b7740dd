//! Driving port for recipe reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Recipe, RecipeId};

/// Domain use-case port for reading recipes.
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Fetch one recipe; `not_found` when the id is unknown.
    async fn get(&self, id: RecipeId) -> Result<Recipe, Error>;

    /// Fetch one page of recipes.
    async fn list(&self, request: PageRequest) -> Result<Page<Recipe>, Error>;
}
