use thiserror::Error;

/// Errors for app logic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Username is required")]
    EmptySearchTerm,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
