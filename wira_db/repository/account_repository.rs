use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use wira_app::repository::AccountRepository;
use wira_types::{
    common::Account,
    errors::{ApplicationError, DbError},
};

use crate::models as db_models;

#[derive(Clone)]
pub struct PostgresAccountRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresAccountRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> AccountRepository for PostgresAccountRepository<'a> {
    async fn get_by_id(&self, account_id: i32) -> Result<Account, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::Account>(
            r#"
            SELECT acc_id, username, email, created_at
            FROM accounts
            WHERE acc_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        rec.map(Into::into)
            .ok_or(ApplicationError::Db(DbError::AccountNotFound(account_id)))
    }
}
