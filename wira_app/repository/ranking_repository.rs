use wira_types::{
    errors::ApplicationError,
    ranking::{ClassStat, PageRequest, RankedEntry, RankingFilter},
};

/// Read-only access to the aggregated score relation.
#[async_trait::async_trait]
pub trait RankingRepository: Send + Sync {
    /// Returns one window of the dense-ranked (account, class) best scores matching
    /// `filter`, ordered by rank then username then class, together with the number
    /// of distinct accounts matching `filter`.
    async fn ranked_page(
        &self,
        filter: &RankingFilter,
        page: PageRequest,
    ) -> Result<(Vec<RankedEntry>, i64), ApplicationError>;

    /// Returns count/average/max/min per class, ordered by class id.
    async fn class_stats(&self) -> Result<Vec<ClassStat>, ApplicationError>;
}
