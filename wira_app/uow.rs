use std::sync::Arc;

use wira_types::errors::ApplicationError;

use crate::repository::*;

/// A Unit of Work (UoW) works as a provider for repositories
/// that all operate within a single transaction.
#[async_trait::async_trait]
pub trait UnitOfWork<'a>: Send + Sync {
    fn accounts(&self) -> Arc<dyn AccountRepository + 'a>;
    fn rankings(&self) -> Arc<dyn RankingRepository + 'a>;

    // All access is read-only: a unit of work always ends in a rollback.
    // Consume self to ensure the UoW is not used afterwards.
    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError>;
}

/// A factory for creating Unit of Work instances.
#[async_trait::async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    /// Begin a new Unit of Work (transaction).
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError>;
}
