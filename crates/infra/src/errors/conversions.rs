//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use roomkeeper_domain::RoomKeeperError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RoomKeeperError);

impl From<InfraError> for RoomKeeperError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RoomKeeperError> for InfraError {
    fn from(value: RoomKeeperError) -> Self {
        InfraError(value)
    }
}

trait IntoRoomKeeperError {
    fn into_roomkeeper(self) -> RoomKeeperError;
}

const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_CHECK: i32 = 275;

/// True when `err` is a UNIQUE or PRIMARY KEY constraint failure.
pub fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(e, _)
            if e.code == rusqlite::ffi::ErrorCode::ConstraintViolation
                && matches!(e.extended_code, SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → RoomKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoRoomKeeperError for SqlError {
    fn into_roomkeeper(self) -> RoomKeeperError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        RoomKeeperError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        RoomKeeperError::Database("database is locked".into())
                    }
                    (
                        ErrorCode::ConstraintViolation,
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY,
                    ) => RoomKeeperError::DuplicateId(message),
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_CHECK) => {
                        RoomKeeperError::InvalidDuration(format!("check constraint failed: {message}"))
                    }
                    _ => RoomKeeperError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                RoomKeeperError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                RoomKeeperError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                RoomKeeperError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                RoomKeeperError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => RoomKeeperError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => RoomKeeperError::Database("invalid SQL query".into()),
            other => RoomKeeperError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_roomkeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → RoomKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoRoomKeeperError for PoolError {
    fn into_roomkeeper(self) -> RoomKeeperError {
        RoomKeeperError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_roomkeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
