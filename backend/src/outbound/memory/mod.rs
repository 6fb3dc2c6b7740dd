//! In-memory adapters for tests and local experiments.
//!
//! Both repositories keep their records behind a `std::sync::Mutex`; lock
//! poisoning is reported as a query error rather than a panic.

mod recipe_repository;
mod user_repository;

pub use recipe_repository::InMemoryRecipeRepository;
pub use user_repository::InMemoryUserRepository;
