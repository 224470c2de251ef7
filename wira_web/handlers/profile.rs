use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wira_types::common::Account;

use crate::handlers::CurrentAccount;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub account_id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        ProfileResponse {
            account_id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

/// GET /api/user/profile
pub async fn profile(CurrentAccount(account): CurrentAccount) -> Json<ProfileResponse> {
    Json(account.into())
}
