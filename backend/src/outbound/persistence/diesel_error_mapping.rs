//! Translate pool and Diesel failures into [`StoreFailure`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StoreFailure;

use super::pool::PoolError;

/// A pool failure means no connection was obtained.
pub(crate) fn map_pool_error(error: PoolError) -> StoreFailure {
    StoreFailure::connection(error.message())
}

/// Classify a Diesel failure, keeping the driver's own message.
///
/// Integrity violations become [`StoreFailure::Constraint`], a lost
/// connection becomes [`StoreFailure::Connection`], and everything else is a
/// [`StoreFailure::Query`].
pub(crate) fn map_diesel_error(error: DieselError, operation: &str) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            %operation,
            "diesel operation failed"
        ),
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    let message = error.to_string();
    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            _,
        ) => StoreFailure::constraint(message),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => StoreFailure::connection(message),
        _ => StoreFailure::query(message),
    }
}
