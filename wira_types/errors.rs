use thiserror::Error;

pub mod app_error;
pub mod db_error;

pub use app_error::AppError;
pub use db_error::DbError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl ApplicationError {
    /// True for failures the caller may retry as-is (store unavailable, query timed out).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::Db(DbError::Database(_)) | ApplicationError::Db(DbError::Timeout(_))
        )
    }
}

impl From<sqlx::Error> for ApplicationError {
    fn from(err: sqlx::Error) -> Self {
        ApplicationError::Db(DbError::Database(err))
    }
}
