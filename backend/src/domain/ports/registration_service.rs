//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and store the account.
    ///
    /// Returns a `conflict` error when the username is already registered.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
