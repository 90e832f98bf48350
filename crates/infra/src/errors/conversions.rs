//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use timegrid_domain::TimeGridError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TimeGridError);

impl From<InfraError> for TimeGridError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TimeGridError> for InfraError {
    fn from(value: TimeGridError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTimeGridError {
    fn into_timegrid(self) -> TimeGridError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → TimeGridError */
/* -------------------------------------------------------------------------- */

impl IntoTimeGridError for SqlError {
    fn into_timegrid(self) -> TimeGridError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        TimeGridError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        TimeGridError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        TimeGridError::Database("unique constraint violation".into())
                    }
                    // SQLITE_CONSTRAINT_CHECK: a column rule in schema.sql rejected the row
                    (ErrorCode::ConstraintViolation, 275) => {
                        TimeGridError::InvalidInput(format!("check constraint failed: {message}"))
                    }
                    _ => TimeGridError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => TimeGridError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                TimeGridError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                TimeGridError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                TimeGridError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => TimeGridError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => TimeGridError::Database("invalid SQL query".into()),
            other => TimeGridError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_timegrid())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → TimeGridError */
/* -------------------------------------------------------------------------- */

impl IntoTimeGridError for PoolError {
    fn into_timegrid(self) -> TimeGridError {
        TimeGridError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_timegrid())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → TimeGridError */
/* -------------------------------------------------------------------------- */

impl IntoTimeGridError for JoinError {
    fn into_timegrid(self) -> TimeGridError {
        TimeGridError::Internal(format!("Task join error: {self}"))
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_timegrid())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
