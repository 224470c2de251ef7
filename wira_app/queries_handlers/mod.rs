mod get_account_by_id;
mod get_class_stats;
mod get_rankings;
mod search_rankings;

pub use get_account_by_id::GetAccountByIdHandler;
pub use get_class_stats::GetClassStatsHandler;
pub use get_rankings::GetRankingsHandler;
pub use search_rankings::SearchRankingsHandler;
