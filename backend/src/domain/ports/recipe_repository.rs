//! Port abstraction for recipe persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Recipe, RecipeDraft, RecipeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Storage for recipe records.
///
/// Identifiers and creation timestamps are assigned by the adapter on insert.
/// Listing is ordered by creation time, then id, so consecutive pages never
/// overlap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new recipe and return the stored record.
    async fn insert(&self, draft: &RecipeDraft) -> Result<Recipe, RecipePersistenceError>;

    /// Fetch a recipe by identifier.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// Fetch one page of recipes together with the total count.
    async fn list(&self, request: PageRequest) -> Result<Page<Recipe>, RecipePersistenceError>;

    /// Replace every editable field of an existing recipe.
    ///
    /// Returns `None` when no recipe has the given id.
    async fn replace(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// Remove a recipe, reporting whether a row was deleted.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipePersistenceError>;
}
