mod auth;
mod error;
mod health;
mod profile;
mod rankings;
mod stats;

pub use auth::{ACCOUNT_COOKIE, CurrentAccount};
pub use error::{ApiError, ErrorResponse, map_error};
pub use health::health;
pub use profile::{ProfileResponse, profile};
pub use rankings::{RankingParams, RankingsResponse, SearchParams, rankings, search_rankings};
pub use stats::{ClassStatsResponse, class_stats};
