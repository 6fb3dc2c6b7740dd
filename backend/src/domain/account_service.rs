//! Account domain service: registration and login.
//!
//! Passwords are hashed through the [`PasswordHasher`] port before the
//! account reaches the [`UserRepository`]; plaintext never leaves this
//! module.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, Password, PasswordHash, Principal, Registration, User,
    Username,
};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Plaintext behind the decoy hash checked when no account matches.
const DECOY_PASSWORD: &str = "Decoy!Login9";

/// Account service implementing [`RegistrationService`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    decoy_hash: Arc<OnceCell<PasswordHash>>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over a user store and a password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }
}

impl<U, H: PasswordHasher> AccountService<U, H> {
    /// Spend one verification on a hash no candidate matches, so logins for
    /// missing accounts take as long as a wrong password for a real one.
    ///
    /// The decoy is hashed with the configured hasher on first use so its
    /// cost tracks the stored hashes.
    async fn verify_decoy(&self, candidate: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| async {
                let password = Password::new(DECOY_PASSWORD)
                    .map_err(|err| PasswordHashError::hash(err.to_string()))?;
                self.hasher.hash(&password).await
            })
            .await;
        let outcome = match decoy {
            Ok(hash) => self.hasher.verify(candidate, hash).await.map(|_| ()),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "decoy password check failed");
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("username already registered")
        }
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            username: registration.username().clone(),
            password_hash,
            role: registration.role(),
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_persistence_error)?;
        tracing::info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        // Registration only admits email usernames, so anything else cannot
        // match a stored account.
        let Ok(username) = Username::new(credentials.username()) else {
            self.verify_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(user) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_persistence_error)?
        else {
            self.verify_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            tracing::debug!(user_id = %user.id(), "password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(Principal::new(user.id(), user.role()))
    }
}
