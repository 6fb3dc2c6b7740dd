//! Recipe API handlers.
//!
//! ```text
//! POST   /api/recipes          (admin)
//! GET    /api/recipes?page=&limit=  (logged in)
//! GET    /api/recipes/{id}
//! PUT    /api/recipes/{id}
//! DELETE /api/recipes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, RECIPE_NOT_FOUND, Recipe, RecipeDraft, RecipeField, RecipeId, RecipeValidationError,
    Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::pagination_error;

/// Recipe body accepted by create and update.
///
/// Numeric fields also accept numeric strings such as `"30"`. Keys outside
/// this schema are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Display name.
    #[schema(example = "Pancakes")]
    pub name: String,
    /// Ingredient lines, at least one.
    #[schema(example = json!(["flour", "milk", "eggs"]))]
    pub ingredients: Vec<String>,
    /// Free-form method.
    #[schema(example = "Whisk everything and fry in butter.")]
    pub instructions: String,
    /// Preparation time in minutes.
    #[schema(example = 10)]
    pub preparation_time: f64,
    /// Cooking time in minutes.
    #[schema(example = 15)]
    pub cook_time: f64,
    /// Number of servings.
    #[schema(example = 4)]
    pub servings: f64,
}

/// Page of recipes returned by `GET /api/recipes`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListResponse {
    /// Recipes on this page, oldest first.
    pub recipes: Vec<Recipe>,
    /// Number of pages at the requested limit.
    pub total_pages: u64,
    /// One-based page number.
    pub current_page: u32,
    /// Number of stored recipes.
    pub total_items: u64,
}

/// Confirmation body for operations without a resource to return.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Recipe deleted")]
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Pagination query for `GET /api/recipes`.
///
/// Values are kept as text so malformed numbers produce a field-level error.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesQuery {
    /// One-based page number (default 1).
    #[param(value_type = Option<u32>, minimum = 1)]
    pub page: Option<String>,
    /// Page size (default 10).
    #[param(value_type = Option<u32>, minimum = 1)]
    pub limit: Option<String>,
}

fn required<'a>(
    payload: &'a Map<String, Value>,
    field: RecipeField,
) -> Result<&'a Value, RecipeValidationError> {
    match payload.get(field.as_str()) {
        None | Some(Value::Null) => Err(RecipeValidationError::Missing { field }),
        Some(value) => Ok(value),
    }
}

fn text(payload: &Map<String, Value>, field: RecipeField) -> Result<&str, RecipeValidationError> {
    required(payload, field)?
        .as_str()
        .ok_or(RecipeValidationError::NotAString { field })
}

fn number(payload: &Map<String, Value>, field: RecipeField) -> Result<f64, RecipeValidationError> {
    let parsed = match required(payload, field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|value| value.is_finite())
        .ok_or(RecipeValidationError::NotANumber { field })
}

fn ingredients(payload: &Map<String, Value>) -> Result<Vec<String>, RecipeValidationError> {
    let Value::Array(items) = required(payload, RecipeField::Ingredients)? else {
        return Err(RecipeValidationError::IngredientsNotAList);
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_owned)
                .ok_or(RecipeValidationError::IngredientNotAString { index })
        })
        .collect()
}

/// Validate a raw JSON object into a [`RecipeDraft`].
///
/// Fields are checked in schema order and the first violation wins; unknown
/// keys are reported after every known field passes.
pub fn parse_recipe_payload(
    payload: &Map<String, Value>,
) -> Result<RecipeDraft, RecipeValidationError> {
    let name = text(payload, RecipeField::Name)?;
    let ingredients = ingredients(payload)?;
    let instructions = text(payload, RecipeField::Instructions)?;
    let preparation_time = number(payload, RecipeField::PreparationTime)?;
    let cook_time = number(payload, RecipeField::CookTime)?;
    let servings = number(payload, RecipeField::Servings)?;

    if let Some(key) = payload
        .keys()
        .find(|key| !RecipeField::ALL.iter().any(|field| field.as_str() == key.as_str()))
    {
        return Err(RecipeValidationError::UnknownField { key: key.clone() });
    }

    RecipeDraft::new(
        name,
        ingredients,
        instructions,
        preparation_time,
        cook_time,
        servings,
    )
}

fn recipe_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::parse(raw).ok_or_else(|| Error::not_found(RECIPE_NOT_FOUND))
}

/// Create a recipe. Admin only.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Invalid recipe", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let draft = parse_recipe_payload(&payload)?;
    let recipe = state.recipes.create(draft).await?;
    Ok(HttpResponse::Created().json(recipe))
}

/// List recipes one page at a time. Requires login.
#[utoipa::path(
    get,
    path = "/api/recipes",
    params(ListRecipesQuery),
    responses(
        (status = 200, description = "Page of recipes", body = RecipeListResponse),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListRecipesQuery>,
) -> ApiResult<web::Json<RecipeListResponse>> {
    session.require_user()?;
    let request = PageRequest::parse(query.page.as_deref(), query.limit.as_deref())
        .map_err(|err| pagination_error(&err))?;
    let page = state.recipes_query.list(request).await?;
    Ok(web::Json(RecipeListResponse {
        total_pages: page.total_pages(),
        current_page: page.current_page(),
        total_items: page.total_items(),
        recipes: page.into_items(),
    }))
}

/// Fetch a single recipe.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 404, description = "Recipe not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Recipe>> {
    let id = recipe_id(&path)?;
    Ok(web::Json(state.recipes_query.get(id).await?))
}

/// Replace every field of a recipe.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 400, description = "Invalid recipe", body = Error),
        (status = 404, description = "Recipe not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe",
    security([])
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<Recipe>> {
    let id = recipe_id(&path)?;
    let draft = parse_recipe_payload(&payload)?;
    Ok(web::Json(state.recipes.update(id, draft).await?))
}

/// Delete a recipe.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe",
    security([])
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = recipe_id(&path)?;
    state.recipes.delete(id).await?;
    Ok(web::Json(MessageResponse::new("Recipe deleted")))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
