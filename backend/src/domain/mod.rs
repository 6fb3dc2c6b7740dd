//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed recipe and account entities, the ports the
//! adapters implement, and the services that drive them. Nothing here knows
//! about HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Recipe / RecipeDraft / RecipeId: recipe records and validated input.
//! - User / Username / Password / Role / Registration: accounts.
//! - LoginCredentials / Principal: authentication input and result.
//! - RecipeService / AccountService: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS};
pub use self::auth::{LoginCredentials, LoginValidationError, Principal};
pub use self::error::{Error, ErrorCode};
pub use self::recipe::{Recipe, RecipeDraft, RecipeField, RecipeId, RecipeValidationError};
pub use self::recipe_service::{RECIPE_NOT_FOUND, RecipeService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewUser, Password, PasswordHash, Registration, Role, User, UserId, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("insufficient role"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
