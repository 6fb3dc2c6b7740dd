//! Embedded PostgreSQL databases for repository suites.
//!
//! Each test gets a fresh database cloned from a template that already has
//! the embedded migrations applied. The template name carries a hash of the
//! migrations directory so schema changes never reuse a stale template.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use recipe_service::outbound::persistence::MIGRATIONS;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "recipes_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Shared cluster for the whole test binary, retried while another binary
/// is still releasing the data directory.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= PROVISION_RETRIES => {
                return Err(format!("start embedded cluster: {error}"));
            }
            Err(_) => {
                std::thread::sleep(PROVISION_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Run every embedded migration against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Create the migrated template once per cluster and return its name.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }

    Ok(template_name)
}

fn provision_attempt(cluster: &ClusterHandle, attempt: usize) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)
        .map_err(|error| format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"))?;
    let db_name = format!("test_{}", Uuid::new_v4());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|error| {
            format!("create database from template: attempt {attempt}/{PROVISION_RETRIES}: {error:?}")
        })
}

/// Fresh migrated database, dropped when the returned guard goes out of scope.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("create database from template: exhausted retries");
    for attempt in 1..=PROVISION_RETRIES {
        match provision_attempt(cluster, attempt) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = error,
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}
