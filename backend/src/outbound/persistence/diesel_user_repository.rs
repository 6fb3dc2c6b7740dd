//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is enforced by the database; a unique violation on
//! insert is reported as [`UserPersistenceError::DuplicateUsername`] so two
//! concurrent registrations cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, PasswordHash, Role, User, UserId, Username};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_username(username.as_str())
        }
        other => map_diesel_error(other),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let role = row.role.parse::<Role>().map_err(|_| {
        warn!(user_id = %row.id, value = %row.role, "unrecognised role in users table");
        UserPersistenceError::query(format!("invalid role for user {}", row.id))
    })?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        Username::from_stored(row.username),
        PasswordHash::new(row.password_hash),
        role,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            username: user.username.as_str(),
            password_hash: user.password_hash.as_str(),
            role: user.role.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &user.username))?;

        row_to_user(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
