//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **hashing**: bcrypt password hashing
//! - **memory**: in-memory repositories for tests (`test-support` feature)
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod hashing;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod persistence;
