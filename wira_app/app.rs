use std::sync::Arc;

use wira_types::errors::{ApplicationError, DbError};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler},
    uow::UnitOfWorkProvider,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Queries to their respective handlers under the configured timeout.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            config,
            uow_provider,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Executes a query.
    /// A query is an operation that reads system state and returns data.
    /// The transaction is *always* rolled back, also when the query times out.
    /// Store failures are returned as-is; retrying is up to the caller.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let timeout = self.config.query_timeout;
        let uow = self.uow_provider.begin().await?;

        let result = tokio::time::timeout(timeout, handler.handle(query, &uow, &self.config)).await;

        uow.rollback().await?;

        match result {
            Ok(output) => output,
            Err(_) => {
                tracing::warn!("Query abandoned after {timeout:?}");
                Err(ApplicationError::Db(DbError::Timeout(timeout)))
            }
        }
    }
}
