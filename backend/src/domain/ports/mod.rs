//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, `*Service`) are
//! what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod registration_service;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
pub use recipes_command::RecipesCommand;
pub use recipes_query::RecipesQuery;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
