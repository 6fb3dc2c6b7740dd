//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing which store or hash algorithm backs it, so handler tests can
//! substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    ///
    /// Unknown usernames and wrong passwords both yield the same
    /// `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}
