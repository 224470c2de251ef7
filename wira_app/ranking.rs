//! Ranking and class statistics over flattened score rows.
//!
//! These functions define the leaderboard semantics independent of the store:
//! best score per (account, class), dense rank by best score descending, ordered by
//! rank then username (byte order) then class id, with the total counting distinct
//! accounts. The Postgres store computes the same thing in SQL.

use std::collections::{BTreeMap, HashSet};

use wira_types::ranking::{ClassStat, PageRequest, RankedEntry, RankingFilter};

/// One score joined with its character and account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub account_id: i32,
    pub username: String,
    pub character_id: i32,
    pub class_id: i32,
    pub reward_score: i32,
}

/// All ranked entries matching a filter, before pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<RankedEntry>,
    pub total_accounts: i64,
}

impl Leaderboard {
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a ScoreRecord>,
        filter: &RankingFilter,
    ) -> Self {
        let mut best: BTreeMap<(i32, i32), (&'a str, i32)> = BTreeMap::new();
        let mut accounts = HashSet::new();

        for record in records {
            if !filter.matches(&record.username, record.class_id) {
                continue;
            }
            accounts.insert(record.account_id);
            best.entry((record.account_id, record.class_id))
                .and_modify(|(_, score)| *score = (*score).max(record.reward_score))
                .or_insert((record.username.as_str(), record.reward_score));
        }

        let mut groups: Vec<(&str, i32, i32)> = best
            .into_iter()
            .map(|((_, class_id), (username, score))| (username, class_id, score))
            .collect();
        groups.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)).then(a.1.cmp(&b.1)));

        let ranks = dense_rank(groups.iter().map(|g| g.2));
        let entries = groups
            .into_iter()
            .zip(ranks)
            .map(|((username, class_id, highest_score), rank)| RankedEntry {
                username: username.to_string(),
                class_id,
                highest_score,
                rank,
            })
            .collect();

        Self {
            entries,
            total_accounts: accounts.len() as i64,
        }
    }

    /// The entries inside `page`; empty past the end.
    pub fn window(&self, page: PageRequest) -> Vec<RankedEntry> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.per_page()).unwrap_or(0);
        self.entries.iter().skip(skip).take(take).cloned().collect()
    }
}

/// Dense ranks for scores already sorted in descending order.
///
/// Equal scores share a rank and the next distinct score gets the next rank.
pub fn dense_rank(sorted_desc: impl IntoIterator<Item = i32>) -> Vec<i64> {
    let mut rank = 0;
    let mut previous = None;

    sorted_desc
        .into_iter()
        .map(|score| {
            if previous != Some(score) {
                rank += 1;
                previous = Some(score);
            }
            rank
        })
        .collect()
}

/// Count/average/max/min per class, ordered by class id. Classes with no score are absent.
pub fn class_stats<'a>(records: impl IntoIterator<Item = &'a ScoreRecord>) -> Vec<ClassStat> {
    struct Acc {
        characters: HashSet<i32>,
        sum: i64,
        count: i64,
        max: i32,
        min: i32,
    }

    let mut per_class: BTreeMap<i32, Acc> = BTreeMap::new();
    for record in records {
        let acc = per_class.entry(record.class_id).or_insert(Acc {
            characters: HashSet::new(),
            sum: 0,
            count: 0,
            max: record.reward_score,
            min: record.reward_score,
        });
        acc.characters.insert(record.character_id);
        acc.sum += i64::from(record.reward_score);
        acc.count += 1;
        acc.max = acc.max.max(record.reward_score);
        acc.min = acc.min.min(record.reward_score);
    }

    per_class
        .into_iter()
        .map(|(class_id, acc)| ClassStat {
            class_id,
            player_count: acc.characters.len() as i64,
            average_score: average_to_cents(acc.sum, acc.count),
            highest_score: acc.max,
            lowest_score: acc.min,
        })
        .collect()
}

/// `sum / count` rounded to two decimals, half away from zero.
///
/// Integer arithmetic, so the result matches Postgres `round(avg(..)::numeric, 2)`.
pub fn average_to_cents(sum: i64, count: i64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scaled = i128::from(sum) * 100;
    let count = i128::from(count);
    let mut cents = scaled / count;
    let remainder = scaled % count;
    if remainder.abs() * 2 >= count {
        cents += scaled.signum() * count.signum();
    }
    cents as f64 / 100.0
}
