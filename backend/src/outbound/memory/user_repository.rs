//! Map-backed `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, Username};

/// Accounts keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        let key = user.username.as_str();
        if users.contains_key(key) {
            return Err(UserPersistenceError::duplicate_username(key));
        }
        let stored = User::new(
            UserId::random(),
            user.username.clone(),
            user.password_hash.clone(),
            user.role,
        );
        users.insert(key.to_owned(), stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        Ok(users.get(username.as_str()).cloned())
    }
}
