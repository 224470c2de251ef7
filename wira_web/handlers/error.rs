use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use wira_types::errors::{AppError, ApplicationError, DbError};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An `ApplicationError` on its way out as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl<E> From<E> for ApiError
where
    E: Into<ApplicationError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ApplicationError::App(AppError::EmptySearchTerm) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ApplicationError::App(AppError::Unauthenticated)
            | ApplicationError::Db(DbError::AccountNotFound(_)) => (
                StatusCode::UNAUTHORIZED,
                AppError::Unauthenticated.to_string(),
            ),
            ApplicationError::Db(e) => {
                tracing::error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            e => {
                tracing::error!("Request failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        map_error(status, message)
    }
}

pub fn map_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
