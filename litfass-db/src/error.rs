use litfass_common::model::ModelValidationError;
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// The single failure surface of the storage gateway. The first three kinds
/// classify driver errors; `Data` means a stored row failed model validation.
/// None of them is retried at this layer.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum StoreError {
    #[error("Database connection lost: {0}")]
    ConnectionLost(String),
    #[error("Database operation timed out: {0}")]
    Timeout(String),
    #[error("Unknown database error: {0}")]
    Unknown(String),
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_) | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                Self::ConnectionLost(err.to_string())
            }
            sqlx::Error::PoolTimedOut => Self::Timeout(err.to_string()),
            // 57014 is Postgres query_canceled, raised by statement timeouts.
            sqlx::Error::Database(db) if db.code().as_deref() == Some("57014") => {
                Self::Timeout(err.to_string())
            }
            _ => Self::Unknown(err.to_string()),
        }
    }
}
