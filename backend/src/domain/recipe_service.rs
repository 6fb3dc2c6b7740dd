//! Recipe domain service.
//!
//! Implements the recipe driving ports over a [`RecipeRepository`], turning
//! absent rows into `not_found` errors and persistence failures into
//! `internal` errors.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    RecipePersistenceError, RecipeRepository, RecipesCommand, RecipesQuery,
};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId};

/// Message returned whenever a recipe id does not resolve.
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// Recipe service implementing [`RecipesCommand`] and [`RecipesQuery`].
#[derive(Clone)]
pub struct RecipeService<R> {
    repository: Arc<R>,
}

impl<R> RecipeService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => {
            Error::internal(format!("recipe repository unavailable: {message}"))
        }
        RecipePersistenceError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> RecipesCommand for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_persistence_error)?;
        tracing::info!(recipe_id = %recipe.id(), "recipe created");
        Ok(recipe)
    }

    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.repository
            .replace(&id, &draft)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(RECIPE_NOT_FOUND))
    }

    async fn delete(&self, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(&id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(RECIPE_NOT_FOUND));
        }
        tracing::info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> RecipesQuery for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn get(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.repository
            .find_by_id(&id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(RECIPE_NOT_FOUND))
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Recipe>, Error> {
        self.repository
            .list(request)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour against a mocked repository.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockRecipeRepository;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> RecipeDraft {
        RecipeDraft::new(
            "Pancakes",
            vec!["flour".to_owned(), "milk".to_owned()],
            "Whisk and fry.",
            10.0,
            15.0,
            4.0,
        )
        .expect("valid draft")
    }

    fn make_service(repo: MockRecipeRepository) -> RecipeService<MockRecipeRepository> {
        RecipeService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_recipe(draft: RecipeDraft) {
        let id = RecipeId::random();
        let mut repo = MockRecipeRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(move |draft| Ok(Recipe::new(id, draft.clone(), Utc::now())));

        let recipe = make_service(repo).create(draft).await.expect("create succeeds");
        assert_eq!(recipe.id(), id);
        assert_eq!(recipe.name(), "Pancakes");
    }

    #[rstest]
    #[tokio::test]
    async fn get_maps_missing_row_to_not_found() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = make_service(repo)
            .get(RecipeId::random())
            .await
            .expect_err("missing recipe");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), RECIPE_NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn update_maps_missing_row_to_not_found(draft: RecipeDraft) {
        let mut repo = MockRecipeRepository::new();
        repo.expect_replace().times(1).return_once(|_, _| Ok(None));

        let error = make_service(repo)
            .update(RecipeId::random(), draft)
            .await
            .expect_err("missing recipe");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_reports_missing_rows(#[case] deleted: bool, #[case] expected: Option<ErrorCode>) {
        let mut repo = MockRecipeRepository::new();
        repo.expect_delete().times(1).return_once(move |_| Ok(deleted));

        let result = make_service(repo).delete(RecipeId::random()).await;
        assert_eq!(result.err().map(|error| error.code()), expected);
    }

    #[rstest]
    #[case(RecipePersistenceError::connection("refused"))]
    #[case(RecipePersistenceError::query("syntax error"))]
    #[tokio::test]
    async fn persistence_failures_become_internal_errors(#[case] failure: RecipePersistenceError) {
        let mut repo = MockRecipeRepository::new();
        repo.expect_list().times(1).return_once(move |_| Err(failure));

        let error = make_service(repo)
            .list(PageRequest::default())
            .await
            .expect_err("store failure");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
