//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return the stored record.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account by its exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
