mod account_repository;
mod ranking_repository;

pub use account_repository::PostgresAccountRepository;
pub use ranking_repository::PostgresRankingRepository;
