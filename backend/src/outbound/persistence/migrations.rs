//! Embedded schema migrations applied at startup.
//!
//! Diesel's migration harness is synchronous, so the run happens on a
//! blocking thread with its own short-lived connection rather than one
//! borrowed from the async pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

fn apply_pending(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
            message: err.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.iter().map(ToString::to_string).collect())
}

/// Apply every pending migration against `database_url`.
///
/// Already-applied migrations are skipped, so calling this on each start is
/// safe.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;

    if applied.is_empty() {
        info!("database schema up to date");
    } else {
        info!(migrations = ?applied, "applied database migrations");
    }
    Ok(())
}
