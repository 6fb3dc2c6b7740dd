//! Vector-backed `RecipeRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeDraft, RecipeId};

/// Recipes held in insertion order, which is also listing order.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored recipes.
    pub fn len(&self) -> usize {
        self.lock().map(|recipes| recipes.len()).unwrap_or_default()
    }

    /// Whether no recipe is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Recipe>>, RecipePersistenceError> {
        self.recipes
            .lock()
            .map_err(|_| RecipePersistenceError::query("recipe store lock poisoned"))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn insert(&self, draft: &RecipeDraft) -> Result<Recipe, RecipePersistenceError> {
        let recipe = Recipe::new(RecipeId::random(), draft.clone(), Utc::now());
        self.lock()?.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        Ok(self.lock()?.iter().find(|recipe| recipe.id() == *id).cloned())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Recipe>, RecipePersistenceError> {
        let recipes = self.lock()?;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = recipes.iter().skip(offset).take(limit).cloned().collect();
        Ok(Page::new(items, request, recipes.len() as u64))
    }

    async fn replace(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut recipes = self.lock()?;
        Ok(recipes
            .iter_mut()
            .find(|recipe| recipe.id() == *id)
            .map(|slot| {
                *slot = slot.replaced_with(draft.clone());
                slot.clone()
            }))
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut recipes = self.lock()?;
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id() != *id);
        Ok(recipes.len() < before)
    }
}
