use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::SignedCookieJar;

use wira_app::{cqrs::queries::GetAccountById, queries_handlers::GetAccountByIdHandler};
use wira_types::{common::Account, errors::AppError};

use crate::{handlers::ApiError, http::AppState};

/// Name of the signed session cookie holding the account id.
pub const ACCOUNT_COOKIE: &str = "account_id";

/// The account behind a request's signed session cookie.
///
/// Rejects with 401 when the cookie is missing, tampered with, or points to an
/// account that no longer exists.
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        let account_id = jar
            .get(ACCOUNT_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i32>().ok())
            .ok_or(AppError::Unauthenticated)?;

        let account = state
            .app_bus
            .query(GetAccountById { id: account_id }, GetAccountByIdHandler::new())
            .await?;

        Ok(CurrentAccount(account))
    }
}
