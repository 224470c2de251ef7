use async_trait::async_trait;
use std::sync::Arc;

use wira_types::{
    errors::ApplicationError,
    ranking::{RankingFilter, RankingPage},
};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetRankings},
    uow::UnitOfWork,
};

pub struct GetRankingsHandler {}

impl GetRankingsHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetRankings> for GetRankingsHandler {
    async fn handle(
        &self,
        query: GetRankings,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetRankings as Query>::Output, ApplicationError> {
        tracing::debug!(
            page = query.page.page(),
            per_page = query.page.per_page(),
            class_id = query.class.id(),
            "Fetching rankings"
        );

        let filter = RankingFilter {
            class: query.class,
            search: None,
        };
        let (entries, total) = uow.rankings().ranked_page(&filter, query.page).await?;

        Ok(RankingPage {
            entries,
            total,
            page: query.page.page(),
            per_page: query.page.per_page(),
        })
    }
}
