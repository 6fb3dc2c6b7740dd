//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are backed by `diesel-async` connections drawn from a `bb8`
//! pool. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; every database error is mapped to the port's
//! persistence error before it leaves.
//!
//! # Example
//!
//! ```no_run
//! use recipe_service::outbound::persistence::{
//!     DbPool, DieselRecipeRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://recipes@localhost/recipes";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! # let _ = recipes;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
