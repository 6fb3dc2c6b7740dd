//! Shared wiring for integration tests: the production app factory over
//! in-memory adapters, plus embedded PostgreSQL for repository suites.

#![expect(dead_code, reason = "each test crate uses a different subset")]

#[path = "../../src/server/app.rs"]
pub mod app;
pub mod cluster_skip;
pub mod embedded_postgres;

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use recipe_service::domain::{AccountService, RecipeService};
use recipe_service::inbound::http::health::HealthState;
use recipe_service::inbound::http::session_config::{SESSION_TTL_DEFAULT, SessionSettings};
use recipe_service::inbound::http::state::HttpState;
use recipe_service::outbound::hashing::BcryptPasswordHasher;
use recipe_service::outbound::memory::{InMemoryRecipeRepository, InMemoryUserRepository};
use serde_json::{Value, json};

use app::{AppDependencies, build_app};

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};

pub const ADMIN: &str = "admin@example.com";
pub const COOK: &str = "cook@example.com";
pub const PASSWORD: &str = "Abcdef1!";

/// Session settings for plain-HTTP tests.
pub fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
        ttl: SESSION_TTL_DEFAULT,
    }
}

/// Production app over fresh in-memory stores, marked ready.
pub async fn init_app()
-> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let recipes = Arc::new(RecipeService::new(Arc::new(InMemoryRecipeRepository::new())));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::with_cost(4)),
    ));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::new(
            recipes.clone(),
            recipes,
            accounts.clone(),
            accounts,
        )),
        session: session_settings(),
    }))
    .await
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::post().uri(uri).set_json(body);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

pub async fn get<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Register `username` with `role` and return a logged-in session cookie.
pub async fn register_and_login<S>(app: &S, username: &str, role: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = post_json(
        app,
        "/register",
        json!({ "username": username, "password": PASSWORD, "role": role }),
        None,
    )
    .await;
    assert_eq!(res.status().as_u16(), 201, "register {username}");

    let res = post_json(
        app,
        "/login",
        json!({ "username": username, "password": PASSWORD }),
        None,
    )
    .await;
    assert_eq!(res.status().as_u16(), 200, "login {username}");
    session_cookie(&res)
}

/// A valid recipe body named `name`.
pub fn recipe_body(name: &str) -> Value {
    json!({
        "name": name,
        "ingredients": ["flour", "milk", "eggs"],
        "instructions": "Whisk everything and fry in butter.",
        "preparationTime": 10,
        "cookTime": 15,
        "servings": 4
    })
}

/// `message` field of an error envelope.
pub async fn error_message(res: ServiceResponse) -> String {
    let body: Value = test::read_body_json(res).await;
    body.get("message")
        .and_then(Value::as_str)
        .expect("error message")
        .to_owned()
}
