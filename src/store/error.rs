//! Error taxonomy for the artifact store.
//!
//! Backend failures are translated into four caller-facing kinds; nothing
//! is swallowed. Constraint violations surface as `Conflict` (uniqueness)
//! or `NotFound` (dangling owner reference), and pool exhaustion within
//! the configured bound surfaces as `Timeout`.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation or illegal state-machine transition.
    #[error("{0}")]
    Conflict(String),

    /// Ownership or credential mismatch.
    #[error("{0}")]
    Auth(String),

    /// The backend did not respond within the configured bound.
    #[error("database operation timed out")]
    Timeout,

    /// Any other backend failure, re-raised as-is.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound("resource not found".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("UNIQUE constraint failed") {
                    StoreError::Conflict("a resource with this identifier already exists".to_string())
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    StoreError::NotFound("referenced owner does not exist".to_string())
                } else {
                    StoreError::Database(err)
                }
            }
            _ => StoreError::Database(err),
        }
    }
}
