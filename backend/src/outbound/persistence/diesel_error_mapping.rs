//! Shared Diesel error mapping for the recipe and user repositories.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures into query or connection constructors.
///
/// Driver messages are logged at debug level and replaced by fixed text so
/// SQL details never reach callers. Repositories that give meaning to a
/// specific database error kind match on it before delegating here.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::DeserializationError(_) => query("unreadable database row"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |msg| Mapped::Query(msg.to_owned()),
            |msg| Mapped::Connection(msg.to_owned()),
        )
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found".to_owned()))]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ),
        Mapped::Connection("database connection error".to_owned())
    )]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("violates check constraint \"users_role_check\"".to_owned()),
        ),
        Mapped::Query("database error".to_owned())
    )]
    fn diesel_errors_are_classified(#[case] error: DieselError, #[case] expected: Mapped) {
        assert_eq!(map(error), expected);
    }
}
