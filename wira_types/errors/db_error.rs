use std::time::Duration;
use thiserror::Error;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Account with ID {0} not found")]
    AccountNotFound(i32),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0} must be set")]
    MissingDatabaseUrl(&'static str),
}
