use async_trait::async_trait;
use std::sync::Arc;

use wira_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetClassStats},
    uow::UnitOfWork,
};

pub struct GetClassStatsHandler {}

impl GetClassStatsHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetClassStats> for GetClassStatsHandler {
    async fn handle(
        &self,
        _query: GetClassStats,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetClassStats as Query>::Output, ApplicationError> {
        let stats = uow.rankings().class_stats().await?;
        tracing::debug!("Computed statistics for {} classes", stats.len());
        Ok(stats)
    }
}
