use async_trait::async_trait;
use std::sync::Arc;

use wira_types::{
    errors::ApplicationError,
    ranking::{RankingFilter, RankingPage},
};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::SearchRankings},
    uow::UnitOfWork,
};

pub struct SearchRankingsHandler {}

impl SearchRankingsHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<SearchRankings> for SearchRankingsHandler {
    async fn handle(
        &self,
        query: SearchRankings,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<SearchRankings as Query>::Output, ApplicationError> {
        tracing::debug!(
            page = query.page.page(),
            per_page = query.page.per_page(),
            class_id = query.class.id(),
            username = query.term.as_str(),
            "Searching rankings"
        );

        let page = query.page;
        let filter = RankingFilter {
            class: query.class,
            search: Some(query.term),
        };
        let (entries, total) = uow.rankings().ranked_page(&filter, page).await?;

        Ok(RankingPage {
            entries,
            total,
            page: page.page(),
            per_page: page.per_page(),
        })
    }
}
