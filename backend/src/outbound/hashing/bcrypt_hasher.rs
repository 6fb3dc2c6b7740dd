//! bcrypt-backed [`PasswordHasher`].
//!
//! Hashing at production cost takes hundreds of milliseconds, so both
//! operations run on tokio's blocking pool.

use async_trait::async_trait;
use tokio::task;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Work factor used outside tests.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt implementation of the `PasswordHasher` port.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using [`DEFAULT_BCRYPT_COST`].
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }

    /// Hasher with an explicit work factor, clamped to bcrypt's 4..=31.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let plaintext = zeroize::Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        let encoded = task::spawn_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = zeroize::Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_str().to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext.as_str(), &encoded))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}
