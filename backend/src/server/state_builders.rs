//! Builds the handler port bundle over PostgreSQL and bcrypt.

use std::sync::Arc;

use actix_web::web;

use recipe_service::domain::{AccountService, RecipeService};
use recipe_service::inbound::http::state::HttpState;
use recipe_service::outbound::hashing::BcryptPasswordHasher;
use recipe_service::outbound::persistence::{DbPool, DieselRecipeRepository, DieselUserRepository};

/// Wire the recipe and account services to Diesel repositories sharing
/// `pool`.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let recipes = Arc::new(RecipeService::new(Arc::new(DieselRecipeRepository::new(
        pool.clone(),
    ))));
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptPasswordHasher::new()),
    ));
    web::Data::new(HttpState::new(
        recipes.clone(),
        recipes,
        accounts.clone(),
        accounts,
    ))
}
