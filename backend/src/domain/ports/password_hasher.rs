//! Port for one-way password hashing.
//!
//! Hashing is deliberately slow, so adapters move the work off the async
//! executor.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hash could not be computed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext candidate against a stored hash.
    async fn verify(&self, candidate: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
