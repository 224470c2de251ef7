use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player account. Username and email are unique and never change after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A character owned by exactly one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i32,
    pub account_id: i32,
    pub class_id: i32,
}

/// One reward entry in a character's append-only score history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub id: i32,
    pub character_id: i32,
    pub reward_score: i32,
}
