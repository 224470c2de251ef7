use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Highest valid class id. Class 0 doubles as the "all classes" filter.
pub const MAX_CLASS_ID: i32 = 8;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Class restriction for rankings. Always within `0..=MAX_CLASS_ID`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassFilter(i32);

impl ClassFilter {
    pub const ALL: ClassFilter = ClassFilter(0);

    /// Out of range or missing input means "all classes".
    pub fn new(raw: Option<i64>) -> Self {
        match raw {
            Some(id) if (0..=MAX_CLASS_ID as i64).contains(&id) => ClassFilter(id as i32),
            _ => ClassFilter::ALL,
        }
    }

    pub fn id(&self) -> i32 {
        self.0
    }

    /// The class to restrict to, or `None` when every class qualifies.
    pub fn class_id(&self) -> Option<i32> {
        if self.0 == 0 { None } else { Some(self.0) }
    }

    pub fn matches(&self, class_id: i32) -> bool {
        self.class_id().is_none_or(|id| id == class_id)
    }
}

/// A page window. `page >= 1` and `per_page` in `1..=MAX_PER_PAGE` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => DEFAULT_PAGE,
        };
        let per_page = match per_page {
            Some(n) if (1..=MAX_PER_PAGE).contains(&n) => n,
            _ => DEFAULT_PER_PAGE,
        };

        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Rows to skip. Saturates so absurd page numbers land past the end instead of overflowing.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Case-insensitive "contains" term for username search. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let term = raw.trim();
        if term.is_empty() {
            return Err(AppError::EmptySearchTerm);
        }
        Ok(SearchTerm(term.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, username: &str) -> bool {
        username.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// Which score rows take part in a ranking. Both restrictions apply before ranking.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RankingFilter {
    pub class: ClassFilter,
    pub search: Option<SearchTerm>,
}

impl RankingFilter {
    pub fn matches(&self, username: &str, class_id: i32) -> bool {
        self.class.matches(class_id) && self.search.as_ref().is_none_or(|t| t.matches(username))
    }
}

/// Best score of one account in one class, with its dense rank in the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub username: String,
    pub class_id: i32,
    pub highest_score: i32,
    pub rank: i64,
}

/// A window over the ranked entries. `total` counts distinct accounts, not rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingPage {
    pub entries: Vec<RankedEntry>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStat {
    pub class_id: i32,
    pub player_count: i64,
    pub average_score: f64,
    pub highest_score: i32,
    pub lowest_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_to_defaults() {
        assert_eq!(PageRequest::new(Some(0), Some(20)).page(), 1);
        assert_eq!(PageRequest::new(Some(-3), None).page(), 1);
        assert_eq!(PageRequest::new(None, None), PageRequest::default());
        assert_eq!(PageRequest::new(Some(2), Some(0)).per_page(), 20);
        assert_eq!(PageRequest::new(Some(2), Some(101)).per_page(), 20);
        assert_eq!(PageRequest::new(Some(2), Some(100)).per_page(), 100);
        assert_eq!(PageRequest::new(Some(2), Some(1)).per_page(), 1);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(Some(1), Some(20)).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(25)).offset(), 50);
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(100)).offset(), i64::MAX);
    }

    #[test]
    fn test_class_filter_out_of_range_means_all() {
        assert_eq!(ClassFilter::new(Some(9)), ClassFilter::ALL);
        assert_eq!(ClassFilter::new(Some(-1)), ClassFilter::ALL);
        assert_eq!(ClassFilter::new(None), ClassFilter::ALL);
        assert_eq!(ClassFilter::new(Some(8)).class_id(), Some(8));
        assert_eq!(ClassFilter::new(Some(0)).class_id(), None);
    }

    #[test]
    fn test_class_filter_matches() {
        assert!(ClassFilter::ALL.matches(3));
        assert!(ClassFilter::new(Some(3)).matches(3));
        assert!(!ClassFilter::new(Some(3)).matches(4));
    }

    #[test]
    fn test_search_term_rejects_blank() {
        assert!(matches!(SearchTerm::parse(""), Err(AppError::EmptySearchTerm)));
        assert!(matches!(SearchTerm::parse("   "), Err(AppError::EmptySearchTerm)));
    }

    #[test]
    fn test_search_term_matches_case_insensitively() {
        let term = SearchTerm::parse(" tuah ").unwrap();
        assert_eq!(term.as_str(), "tuah");
        assert!(term.matches("Sang Tuah Pendekar 12"));
        assert!(!term.matches("Sang Jebat Wira 3"));
    }

    #[test]
    fn test_ranking_filter_combines_class_and_search() {
        let filter = RankingFilter {
            class: ClassFilter::new(Some(2)),
            search: Some(SearchTerm::parse("TUAH").unwrap()),
        };

        assert!(filter.matches("tuah", 2));
        assert!(!filter.matches("tuah", 3));
        assert!(!filter.matches("jebat", 2));
        assert!(RankingFilter::default().matches("anyone", 7));
    }
}
