mod account_repository;
mod ranking_repository;

pub use account_repository::AccountRepository;
pub use ranking_repository::RankingRepository;
