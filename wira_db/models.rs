use chrono::{DateTime, Utc};
use sqlx::FromRow;

use wira_types::{
    common,
    ranking::{ClassStat, RankedEntry},
};

#[derive(Debug, FromRow, Clone)]
pub struct Account {
    pub acc_id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for common::Account {
    fn from(account: Account) -> Self {
        common::Account {
            id: account.acc_id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

/// One row of the ranked page query.
///
/// The total is always present; the entry columns are `NULL` on the single row
/// returned when the page is past the end or nothing matched.
#[derive(Debug, FromRow, Clone)]
pub struct RankedRow {
    pub total: i64,
    pub username: Option<String>,
    pub class_id: Option<i32>,
    pub highest_score: Option<i32>,
    pub rank: Option<i64>,
}

impl RankedRow {
    pub fn into_entry(self) -> Option<RankedEntry> {
        Some(RankedEntry {
            username: self.username?,
            class_id: self.class_id?,
            highest_score: self.highest_score?,
            rank: self.rank?,
        })
    }
}

#[derive(Debug, FromRow, Clone)]
pub struct ClassStatRow {
    pub class_id: i32,
    pub player_count: i64,
    pub average_score: f64,
    pub highest_score: i32,
    pub lowest_score: i32,
}

impl From<ClassStatRow> for ClassStat {
    fn from(row: ClassStatRow) -> Self {
        ClassStat {
            class_id: row.class_id,
            player_count: row.player_count,
            average_score: row.average_score,
            highest_score: row.highest_score,
            lowest_score: row.lowest_score,
        }
    }
}
