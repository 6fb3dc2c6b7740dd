//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, Route, web};

use crate::domain::{AccountService, Error, Principal, RecipeService, Role, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::outbound::hashing::BcryptPasswordHasher;
use crate::outbound::memory::{InMemoryRecipeRepository, InMemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state over fresh in-memory stores and a minimum-cost hasher.
pub fn memory_http_state() -> HttpState {
    let recipes = Arc::new(RecipeService::new(Arc::new(InMemoryRecipeRepository::new())));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::with_cost(4)),
    ));
    HttpState::new(recipes.clone(), recipes, accounts.clone(), accounts)
}

/// Route binding the session to a random user holding the role named in the
/// `{role}` path segment. Mount it at `/test-login/{role}`.
pub fn fixture_login_route() -> Route {
    web::get().to(|session: SessionContext, role: web::Path<String>| async move {
        let role = role
            .parse::<Role>()
            .map_err(|_| Error::invalid_request("unknown fixture role"))?;
        session.persist_principal(&Principal::new(UserId::random(), role))?;
        Ok::<_, Error>(HttpResponse::Ok().finish())
    })
}
