//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Listings are ordered by `created_at` and then `id`, so page boundaries
//! stay stable while rows are only appended.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeDraft, RecipeId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRecipeRow, RecipeRow, RecipeUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    map_basic_pool_error(error, RecipePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipePersistenceError {
    map_basic_diesel_error(
        error,
        RecipePersistenceError::query,
        RecipePersistenceError::connection,
    )
}

/// Rebuild a domain recipe, rejecting rows that no longer satisfy the
/// content rules.
fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipePersistenceError> {
    let draft = RecipeDraft::new(
        &row.name,
        row.ingredients,
        &row.instructions,
        row.preparation_time,
        row.cook_time,
        row.servings,
    )
    .map_err(|err| {
        RecipePersistenceError::query(format!("stored recipe {} is invalid: {err}", row.id))
    })?;
    Ok(Recipe::new(RecipeId::from_uuid(row.id), draft, row.created_at))
}

fn to_new_row(id: Uuid, draft: &RecipeDraft) -> NewRecipeRow<'_> {
    NewRecipeRow {
        id,
        name: draft.name(),
        ingredients: draft.ingredients(),
        instructions: draft.instructions(),
        preparation_time: draft.preparation_time(),
        cook_time: draft.cook_time(),
        servings: draft.servings(),
    }
}

fn to_update(draft: &RecipeDraft) -> RecipeUpdate<'_> {
    RecipeUpdate {
        name: draft.name(),
        ingredients: draft.ingredients(),
        instructions: draft.instructions(),
        preparation_time: draft.preparation_time(),
        cook_time: draft.cook_time(),
        servings: draft.servings(),
    }
}

/// `LIMIT` and `OFFSET` for `request`. Offsets past `i64::MAX` saturate, so a
/// page beyond the data is empty rather than an error.
fn page_bounds(request: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    (i64::from(request.limit()), offset)
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, draft: &RecipeDraft) -> Result<Recipe, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(to_new_row(Uuid::new_v4(), draft))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_recipe(row)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_recipe).transpose()
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Recipe>, RecipePersistenceError> {
        let (limit, offset) = page_bounds(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = recipes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order((recipes::created_at.asc(), recipes::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_recipe)
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(items, request, total))
    }

    async fn replace(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = recipes::table.filter(recipes::id.eq(id.as_uuid()));
        let row: Option<RecipeRow> = diesel::update(target)
            .set(to_update(draft))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_recipe).transpose()
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(recipes::table.filter(recipes::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn row(name: &str, ingredients: Vec<String>) -> RecipeRow {
        RecipeRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            ingredients,
            instructions: "Mix and bake.".to_owned(),
            preparation_time: 10.0,
            cook_time: 20.0,
            servings: 4.0,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_row_converts_to_recipe() {
        let source = row("Bread", vec!["flour".to_owned(), "water".to_owned()]);
        let id = source.id;
        let recipe = row_to_recipe(source).expect("row is valid");
        assert_eq!(recipe.id().as_uuid(), &id);
        assert_eq!(recipe.ingredients(), ["flour", "water"]);
    }

    #[rstest]
    fn corrupted_row_maps_to_query_error() {
        let err = row_to_recipe(row("Bread", Vec::new())).expect_err("no ingredients");
        assert!(matches!(err, RecipePersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(1, 10, 10, 0)]
    #[case(3, 10, 10, 20)]
    #[case(2, 7, 7, 7)]
    fn page_bounds_follow_request(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected_limit: i64,
        #[case] expected_offset: i64,
    ) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(page_bounds(request), (expected_limit, expected_offset));
    }

    #[rstest]
    fn page_bounds_saturate_huge_offsets() {
        let request =
            PageRequest::parse(Some("4294967295"), Some("4294967295")).expect("valid request");
        assert_eq!(page_bounds(request), (i64::from(u32::MAX), i64::MAX));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, RecipePersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
