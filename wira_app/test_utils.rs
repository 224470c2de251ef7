#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use wira_types::{
        common::{Account, Character, Score},
        errors::{ApplicationError, DbError},
        ranking::{ClassStat, PageRequest, RankedEntry, RankingFilter},
    };

    use crate::{
        config::Config,
        ranking::{Leaderboard, ScoreRecord, class_stats},
        repository::{AccountRepository, RankingRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    pub const TEST_COOKIE_SECRET: &str =
        "wira-test-cookie-secret-0123456789abcdef0123456789abcdef0123456789abcdef";

    pub fn test_config() -> Config {
        Config {
            port: 0,
            auth_cookie_secret: TEST_COOKIE_SECRET.to_string(),
            rate_limit_per_second: 1.0,
            rate_limit_burst: 5,
            rate_limit_sweep_interval: Duration::from_secs(60),
            rate_limit_idle_timeout: Duration::from_secs(180),
            trust_forwarded_for: false,
            cors_origins: vec!["http://localhost:5173".to_string()],
            query_timeout: Duration::from_secs(5),
        }
    }

    #[derive(Default)]
    struct Tables {
        accounts: Vec<Account>,
        characters: Vec<Character>,
        scores: Vec<Score>,
    }

    /// Accounts, characters and scores kept in memory, with fault injection.
    #[derive(Default)]
    pub struct InMemoryScoreStore {
        tables: Mutex<Tables>,
        unavailable: AtomicBool,
        latency: Mutex<Duration>,
    }

    impl InMemoryScoreStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_account(&self, username: &str) -> Account {
            let mut tables = self.tables.lock().unwrap();
            let account = Account {
                id: tables.accounts.len() as i32 + 1,
                username: username.to_string(),
                email: format!(
                    "{}@wira-ranking.com",
                    username.to_lowercase().replace(' ', ".")
                ),
                created_at: Utc::now(),
            };
            tables.accounts.push(account.clone());
            account
        }

        pub fn add_character(&self, account_id: i32, class_id: i32) -> Character {
            let mut tables = self.tables.lock().unwrap();
            let character = Character {
                id: tables.characters.len() as i32 + 1,
                account_id,
                class_id,
            };
            tables.characters.push(character);
            character
        }

        pub fn add_score(&self, character_id: i32, reward_score: i32) -> Score {
            let mut tables = self.tables.lock().unwrap();
            let score = Score {
                id: tables.scores.len() as i32 + 1,
                character_id,
                reward_score,
            };
            tables.scores.push(score);
            score
        }

        /// Creates an account with a single character of `class_id` holding `scores`.
        pub fn seed_player(&self, username: &str, class_id: i32, scores: &[i32]) -> Account {
            let account = self.add_account(username);
            let character = self.add_character(account.id, class_id);
            for score in scores {
                self.add_score(character.id, *score);
            }
            account
        }

        pub fn account_by_username(&self, username: &str) -> Option<Account> {
            let tables = self.tables.lock().unwrap();
            tables
                .accounts
                .iter()
                .find(|a| a.username == username)
                .cloned()
        }

        /// Makes every read fail like a lost database connection.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Delays every read by `latency`.
        pub fn set_latency(&self, latency: Duration) {
            *self.latency.lock().unwrap() = latency;
        }

        /// Inner join of accounts, characters and scores.
        pub fn records(&self) -> Vec<ScoreRecord> {
            let tables = self.tables.lock().unwrap();
            tables
                .scores
                .iter()
                .filter_map(|score| {
                    let character = tables
                        .characters
                        .iter()
                        .find(|c| c.id == score.character_id)?;
                    let account = tables
                        .accounts
                        .iter()
                        .find(|a| a.id == character.account_id)?;
                    Some(ScoreRecord {
                        account_id: account.id,
                        username: account.username.clone(),
                        character_id: character.id,
                        class_id: character.class_id,
                        reward_score: score.reward_score,
                    })
                })
                .collect()
        }

        async fn read(&self) -> Result<(), ApplicationError> {
            let latency = *self.latency.lock().unwrap();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ApplicationError::Db(DbError::Database(
                    sqlx::Error::PoolTimedOut,
                )));
            }
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct MockRankingRepository {
        store: Arc<InMemoryScoreStore>,
    }

    #[async_trait]
    impl RankingRepository for MockRankingRepository {
        async fn ranked_page(
            &self,
            filter: &RankingFilter,
            page: PageRequest,
        ) -> Result<(Vec<RankedEntry>, i64), ApplicationError> {
            self.store.read().await?;
            let board = Leaderboard::build(&self.store.records(), filter);
            Ok((board.window(page), board.total_accounts))
        }

        async fn class_stats(&self) -> Result<Vec<ClassStat>, ApplicationError> {
            self.store.read().await?;
            Ok(class_stats(&self.store.records()))
        }
    }

    #[derive(Clone)]
    pub struct MockAccountRepository {
        store: Arc<InMemoryScoreStore>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn get_by_id(&self, account_id: i32) -> Result<Account, ApplicationError> {
            self.store.read().await?;
            let tables = self.store.tables.lock().unwrap();
            tables
                .accounts
                .iter()
                .find(|a| a.id == account_id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::AccountNotFound(account_id)))
        }
    }

    #[derive(Clone, Default)]
    pub struct MockUnitOfWork {
        store: Arc<InMemoryScoreStore>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_store(store: Arc<InMemoryScoreStore>) -> Self {
            Self { store }
        }

        pub fn store(&self) -> &InMemoryScoreStore {
            &self.store
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn accounts(&self) -> Arc<dyn AccountRepository + 'a> {
            Arc::new(MockAccountRepository {
                store: self.store.clone(),
            })
        }

        fn rankings(&self) -> Arc<dyn RankingRepository + 'a> {
            Arc::new(MockRankingRepository {
                store: self.store.clone(),
            })
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            Ok(())
        }
    }

    pub struct MockUnitOfWorkProvider {
        store: Arc<InMemoryScoreStore>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new(store: Arc<InMemoryScoreStore>) -> Self {
            Self { store }
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            Ok(Box::new(MockUnitOfWork::with_store(self.store.clone())))
        }
    }
}
