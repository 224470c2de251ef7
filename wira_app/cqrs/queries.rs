use wira_types::{
    common::Account,
    ranking::{ClassFilter, ClassStat, PageRequest, RankingPage, SearchTerm},
};

use crate::cqrs::Query;

/// Fetch a page of the leaderboard, optionally restricted to one class.
pub struct GetRankings {
    pub class: ClassFilter,
    pub page: PageRequest,
}

impl Query for GetRankings {
    type Output = RankingPage;
}

/// Fetch a page of the leaderboard restricted to usernames containing `term`.
pub struct SearchRankings {
    pub term: SearchTerm,
    pub class: ClassFilter,
    pub page: PageRequest,
}

impl Query for SearchRankings {
    type Output = RankingPage;
}

/// Per-class score statistics, one row per class with at least one score.
pub struct GetClassStats;

impl Query for GetClassStats {
    type Output = Vec<ClassStat>;
}

/// Fetch an account by id (for authenticated sessions).
pub struct GetAccountById {
    pub id: i32,
}

impl Query for GetAccountById {
    type Output = Account;
}
