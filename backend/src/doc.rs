//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint, the request and response bodies
//! they exchange, and the session cookie security scheme. Swagger UI serves
//! it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Recipe, Role};
use crate::inbound::http::recipes::{MessageResponse, RecipeListResponse, RecipeRequest};
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe service API",
        description = "Recipe catalogue with session-authenticated accounts and admin-only authoring.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Recipe,
        RecipeRequest,
        RecipeListResponse,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        Role,
    )),
    tags(
        (name = "recipes", description = "Recipe catalogue"),
        (name = "users", description = "Registration and session management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
