//! Repository tests against a real Postgres (`TEST_DATABASE_URL`).
//!
//! Every test works inside one transaction that is rolled back on drop.

use sqlx::{PgPool, Postgres, Row, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use wira_app::repository::{AccountRepository, RankingRepository};
use wira_db::{PostgresAccountRepository, PostgresRankingRepository, establish_test_connection_pool};
use wira_types::{
    errors::{ApplicationError, DbError},
    ranking::{ClassFilter, PageRequest, RankingFilter, SearchTerm},
};

type SharedTx = Arc<Mutex<Transaction<'static, Postgres>>>;

async fn setup() -> (PgPool, SharedTx) {
    let pool = establish_test_connection_pool().await.unwrap();
    sqlx::migrate!("../migrations").run(&pool).await.unwrap();
    let tx = pool.begin().await.unwrap();
    (pool, Arc::new(Mutex::new(tx)))
}

async fn seed_player(tx: &SharedTx, username: &str, class_id: i32, scores: &[i32]) -> i32 {
    let mut guard = tx.lock().await;
    let acc_id: i32 = sqlx::query(
        "INSERT INTO accounts (username, email) VALUES ($1, $2) RETURNING acc_id",
    )
    .bind(username)
    .bind(format!("{}@wira-test.local", username.to_lowercase().replace(' ', ".")))
    .fetch_one(&mut **guard)
    .await
    .unwrap()
    .get("acc_id");

    let char_id: i32 =
        sqlx::query("INSERT INTO characters (acc_id, class_id) VALUES ($1, $2) RETURNING char_id")
            .bind(acc_id)
            .bind(class_id)
            .fetch_one(&mut **guard)
            .await
            .unwrap()
            .get("char_id");

    for score in scores {
        sqlx::query("INSERT INTO scores (char_id, reward_score) VALUES ($1, $2)")
            .bind(char_id)
            .bind(*score)
            .execute(&mut **guard)
            .await
            .unwrap();
    }

    acc_id
}

async fn clear(tx: &SharedTx) {
    let mut guard = tx.lock().await;
    sqlx::query("DELETE FROM accounts")
        .execute(&mut **guard)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_postgres_tuah_end_to_end() {
    let (_pool, tx) = setup().await;
    clear(&tx).await;
    seed_player(&tx, "Tuah", 2, &[4000, 5200, 4900]).await;

    let repo = PostgresRankingRepository::new(tx.clone());
    let (entries, total) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "Tuah");
    assert_eq!(entries[0].class_id, 2);
    assert_eq!(entries[0].highest_score, 5200);
    assert_eq!(entries[0].rank, 1);
}

#[tokio::test]
async fn test_postgres_dense_rank_search_and_paging() {
    let (_pool, tx) = setup().await;
    clear(&tx).await;
    seed_player(&tx, "Sang Tuah Pendekar 1", 1, &[4200, 3100]).await;
    seed_player(&tx, "Tok Tuah Wira 2", 3, &[6000]).await;
    seed_player(&tx, "Dang Jebat Hulubalang 3", 1, &[4200]).await;
    seed_player(&tx, "100%_Real", 4, &[50]).await;

    let repo = PostgresRankingRepository::new(tx.clone());

    let (entries, total) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let ranks: Vec<(&str, i64)> = entries.iter().map(|e| (e.username.as_str(), e.rank)).collect();
    assert_eq!(total, 4);
    assert_eq!(
        ranks,
        vec![
            ("Tok Tuah Wira 2", 1),
            ("Dang Jebat Hulubalang 3", 2),
            ("Sang Tuah Pendekar 1", 2),
            ("100%_Real", 3),
        ]
    );

    let search = RankingFilter {
        class: ClassFilter::ALL,
        search: Some(SearchTerm::parse("TUAH").unwrap()),
    };
    let (entries, total) = repo
        .ranked_page(&search, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[1].username, "Sang Tuah Pendekar 1");
    assert_eq!(entries[1].rank, 2);

    let literal = RankingFilter {
        class: ClassFilter::ALL,
        search: Some(SearchTerm::parse("%").unwrap()),
    };
    let (_, total) = repo
        .ranked_page(&literal, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);

    let (entries, total) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::new(Some(5), Some(2)))
        .await
        .unwrap();
    assert!(entries.is_empty());
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_postgres_ties_order_usernames_bytewise() {
    let (_pool, tx) = setup().await;
    clear(&tx).await;
    seed_player(&tx, "alpha", 1, &[700]).await;
    seed_player(&tx, "Bravo", 1, &[700]).await;

    let repo = PostgresRankingRepository::new(tx.clone());

    let (entries, total) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Bravo", "alpha"]);
    assert!(entries.iter().all(|e| e.rank == 1));

    let (entries, _) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::new(Some(1), Some(1)))
        .await
        .unwrap();
    assert_eq!(entries[0].username, "Bravo");

    let (entries, _) = repo
        .ranked_page(&RankingFilter::default(), PageRequest::new(Some(2), Some(1)))
        .await
        .unwrap();
    assert_eq!(entries[0].username, "alpha");
}

#[tokio::test]
async fn test_postgres_search_within_class() {
    let (_pool, tx) = setup().await;
    clear(&tx).await;
    seed_player(&tx, "Sang Tuah Pendekar 1", 1, &[4200, 3100]).await;
    seed_player(&tx, "Tok Tuah Wira 2", 3, &[6000]).await;
    seed_player(&tx, "Dang Jebat Hulubalang 3", 1, &[4200]).await;

    let repo = PostgresRankingRepository::new(tx.clone());
    let filter = RankingFilter {
        class: ClassFilter::new(Some(1)),
        search: Some(SearchTerm::parse("tuah").unwrap()),
    };

    let (entries, total) = repo
        .ranked_page(&filter, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "Sang Tuah Pendekar 1");
    assert_eq!(entries[0].class_id, 1);
    assert_eq!(entries[0].highest_score, 4200);
    assert_eq!(entries[0].rank, 1);
}

#[tokio::test]
async fn test_postgres_class_stats() {
    let (_pool, tx) = setup().await;
    clear(&tx).await;
    seed_player(&tx, "Sang Tuah Pendekar 1", 1, &[4200, 3100]).await;
    seed_player(&tx, "Dang Jebat Hulubalang 3", 1, &[4200]).await;
    seed_player(&tx, "Tok Tuah Wira 2", 3, &[6000]).await;

    let repo = PostgresRankingRepository::new(tx.clone());
    let stats = repo.class_stats().await.unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].class_id, 1);
    assert_eq!(stats[0].player_count, 2);
    assert_eq!(stats[0].average_score, 3833.33);
    assert_eq!(stats[0].highest_score, 4200);
    assert_eq!(stats[0].lowest_score, 3100);
    assert_eq!(stats[1].class_id, 3);
}

#[tokio::test]
async fn test_postgres_account_lookup() {
    let (_pool, tx) = setup().await;
    let id = seed_player(&tx, "Kasturi Lookup", 0, &[]).await;

    let repo = PostgresAccountRepository::new(tx.clone());

    let account = repo.get_by_id(id).await.unwrap();
    assert_eq!(account.username, "Kasturi Lookup");
    assert_eq!(account.email, "kasturi.lookup@wira-test.local");

    let missing = repo.get_by_id(-1).await;
    assert!(matches!(
        missing,
        Err(ApplicationError::Db(DbError::AccountNotFound(-1)))
    ));
}
