//! Shared helpers for Diesel repository implementations.
//!
//! Each repository owns a distinct port error type, so these helpers stop at
//! classifying what went wrong; the repositories map the classification onto
//! their own error enums.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// A classified Diesel failure.
#[derive(Debug)]
pub(crate) enum DieselFailure {
    /// The query matched no rows.
    NotFound,
    /// The connection dropped mid-operation.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },
    /// Any other query failure.
    Query(String),
}

impl DieselFailure {
    /// Whether the violated constraint involves the named column.
    ///
    /// Checks the constraint name when the driver reports one and falls back
    /// to the error message, since boxed error information carries no
    /// constraint name.
    pub(crate) fn violates_constraint_on(&self, column: &str) -> bool {
        let Self::UniqueViolation {
            constraint,
            message,
        } = self
        else {
            return false;
        };
        constraint
            .as_deref()
            .is_some_and(|name| name.contains(column))
            || message.to_lowercase().contains(column)
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(
    error: diesel::result::Error,
    operation: &str,
) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DieselFailure::Connection(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
                message: info.message().to_owned(),
            }
        }
        DieselError::DatabaseError(_, info) => DieselFailure::Query(info.message().to_owned()),
        other => DieselFailure::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn unique_violation(message: &str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(message.to_owned()),
        )
    }

    #[rstest]
    fn not_found_classifies_as_not_found() {
        assert!(matches!(
            classify_diesel_error(DieselError::NotFound, "find contact"),
            DieselFailure::NotFound
        ));
    }

    #[rstest]
    fn closed_connection_classifies_as_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );

        let failure = classify_diesel_error(error, "list contacts");
        assert!(matches!(failure, DieselFailure::Connection(message)
            if message.contains("closed")));
    }

    #[rstest]
    #[case("duplicate key value violates unique constraint \"users_username_key\"", true)]
    #[case("duplicate key value violates unique constraint \"users_pkey\"", false)]
    fn unique_violations_match_on_column(#[case] message: &str, #[case] expected: bool) {
        let failure = classify_diesel_error(unique_violation(message), "create user");

        assert!(matches!(failure, DieselFailure::UniqueViolation { .. }));
        assert_eq!(failure.violates_constraint_on("username"), expected);
    }

    #[rstest]
    fn pool_errors_surface_their_message() {
        let message = map_pool_error_message(PoolError::checkout("timed out"));
        assert_eq!(message, "timed out");
    }
}
