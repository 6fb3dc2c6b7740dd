//! Account API handlers.
//!
//! ```text
//! POST /register {"username":"cook@example.com","password":"Abcdef1!","role":"user"}
//! POST /login    {"username":"cook@example.com","password":"Abcdef1!"}
//! POST /logout
//! ```

use std::fmt;

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, INVALID_CREDENTIALS, LoginCredentials, Registration, Role, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address used to log in.
    #[schema(example = "cook@example.com")]
    pub username: String,
    /// At least eight characters with upper and lower case letters, a digit
    /// and one of `@$!%*?&`.
    #[schema(example = "Abcdef1!")]
    pub password: String,
    /// `admin` or `user`; defaults to `user`.
    #[serde(default)]
    #[schema(example = "user")]
    pub role: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

/// Login body for `POST /login`.
///
/// Missing fields are treated as blank and rejected like wrong credentials.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    /// Registered username.
    #[schema(example = "cook@example.com")]
    pub username: String,
    /// Account password.
    #[schema(example = "Abcdef1!")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Authenticated account.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// Role bound to the session.
    pub role: Role,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid username, password or role", body = Error),
        (status = 409, description = "Username already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&username, &password, role.as_deref())?;
    state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User registered")))
}

/// Authenticate and bind the session to the account.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    // Blank fields get the same answer as a wrong password.
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    Ok(web::Json(LoginResponse {
        user_id: principal.user_id(),
        role: principal.role(),
    }))
}

/// Drop the session. Succeeds whether or not one existed.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
