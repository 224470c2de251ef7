use wira_types::{common::Account, errors::ApplicationError};

#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync {
    /// Returns an account by id.
    async fn get_by_id(&self, account_id: i32) -> Result<Account, ApplicationError>;
}
