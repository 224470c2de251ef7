use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use wira_app::repository::RankingRepository;
use wira_types::{
    errors::{ApplicationError, DbError},
    ranking::{ClassStat, PageRequest, RankedEntry, RankingFilter},
};

use crate::models as db_models;

// Page and total come from one statement so they always describe the same snapshot.
// Usernames tie-break in byte order (`COLLATE "C"`) whatever the database locale.
// The total is cross joined onto the page, so a page past the end still yields one
// row carrying it with NULL entry columns.
const RANKED_PAGE_SQL: &str = r#"
    WITH filtered AS (
        SELECT a.acc_id, a.username, c.class_id, s.reward_score
        FROM accounts a
        JOIN characters c ON c.acc_id = a.acc_id
        JOIN scores s ON s.char_id = c.char_id
        WHERE ($1::int IS NULL OR c.class_id = $1)
          AND ($2::text IS NULL OR strpos(lower(a.username), lower($2)) > 0)
    ),
    ranked AS (
        SELECT username,
               class_id,
               MAX(reward_score) AS highest_score,
               DENSE_RANK() OVER (ORDER BY MAX(reward_score) DESC) AS rank
        FROM filtered
        GROUP BY acc_id, username, class_id
    ),
    page AS (
        SELECT username, class_id, highest_score, rank
        FROM ranked
        ORDER BY rank, username COLLATE "C", class_id
        LIMIT $3 OFFSET $4
    )
    SELECT t.total, p.username, p.class_id, p.highest_score, p.rank
    FROM (SELECT COUNT(DISTINCT acc_id) AS total FROM filtered) t
    LEFT JOIN page p ON TRUE
    ORDER BY p.rank, p.username COLLATE "C", p.class_id
"#;

const CLASS_STATS_SQL: &str = r#"
    SELECT c.class_id,
           COUNT(DISTINCT c.char_id) AS player_count,
           ROUND(AVG(s.reward_score)::numeric, 2)::float8 AS average_score,
           MAX(s.reward_score) AS highest_score,
           MIN(s.reward_score) AS lowest_score
    FROM characters c
    JOIN scores s ON s.char_id = c.char_id
    GROUP BY c.class_id
    ORDER BY c.class_id
"#;

#[derive(Clone)]
pub struct PostgresRankingRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresRankingRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> RankingRepository for PostgresRankingRepository<'a> {
    async fn ranked_page(
        &self,
        filter: &RankingFilter,
        page: PageRequest,
    ) -> Result<(Vec<RankedEntry>, i64), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let rows = sqlx::query_as::<_, db_models::RankedRow>(RANKED_PAGE_SQL)
            .bind(filter.class.class_id())
            .bind(filter.search.as_ref().map(|t| t.as_str()))
            .bind(page.per_page())
            .bind(page.offset())
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| {
                tracing::error!("Ranked page query failed: {e}");
                ApplicationError::Db(DbError::Database(e))
            })?;

        let total = rows.first().map(|r| r.total).unwrap_or(0);
        let entries = rows
            .into_iter()
            .filter_map(db_models::RankedRow::into_entry)
            .collect();

        Ok((entries, total))
    }

    async fn class_stats(&self) -> Result<Vec<ClassStat>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let rows = sqlx::query_as::<_, db_models::ClassStatRow>(CLASS_STATS_SQL)
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| {
                tracing::error!("Class statistics query failed: {e}");
                ApplicationError::Db(DbError::Database(e))
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
