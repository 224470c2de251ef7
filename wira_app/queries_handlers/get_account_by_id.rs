use async_trait::async_trait;
use std::sync::Arc;

use wira_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetAccountById},
    uow::UnitOfWork,
};

pub struct GetAccountByIdHandler {}

impl GetAccountByIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetAccountById> for GetAccountByIdHandler {
    async fn handle(
        &self,
        query: GetAccountById,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetAccountById as Query>::Output, ApplicationError> {
        let repo = uow.accounts();
        repo.get_by_id(query.id).await
    }
}
