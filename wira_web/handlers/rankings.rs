use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};

use wira_app::{
    cqrs::queries::{GetRankings, SearchRankings},
    queries_handlers::{GetRankingsHandler, SearchRankingsHandler},
};
use wira_types::ranking::{ClassFilter, PageRequest, RankedEntry, RankingPage, SearchTerm};

use crate::{
    handlers::{ApiError, CurrentAccount},
    http::AppState,
};

/// Raw query string. Values stay strings so malformed numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub class_id: Option<String>,
    pub username: Option<String>,
}

impl RankingParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(parse_int(&self.page), parse_int(&self.per_page))
    }

    pub fn class_filter(&self) -> ClassFilter {
        ClassFilter::new(parse_int(&self.class_id))
    }
}

fn parse_int(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankingsResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub data: Vec<RankedEntry>,
}

impl From<RankingPage> for RankingsResponse {
    fn from(page: RankingPage) -> Self {
        RankingsResponse {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            data: page.entries,
        }
    }
}

/// GET /api/rankings
pub async fn rankings(
    State(state): State<AppState>,
    _account: CurrentAccount,
    Query(params): Query<RankingParams>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let query = GetRankings {
        class: params.class_filter(),
        page: params.page_request(),
    };

    let page = state.app_bus.query(query, GetRankingsHandler::new()).await?;
    Ok(Json(page.into()))
}

/// Search query string with the username already validated.
///
/// Rejects with 400 on a missing or blank username without touching the store.
pub struct SearchParams {
    pub term: SearchTerm,
    pub params: RankingParams,
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<RankingParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        let term = SearchTerm::parse(params.username.as_deref().unwrap_or_default())?;
        Ok(SearchParams { term, params })
    }
}

/// GET /api/rankings/search
// `SearchParams` is extracted before `CurrentAccount`, so a blank username is
// rejected before the session lookup reaches the store.
pub async fn search_rankings(
    State(state): State<AppState>,
    SearchParams { term, params }: SearchParams,
    _account: CurrentAccount,
) -> Result<Json<RankingsResponse>, ApiError> {
    let query = SearchRankings {
        term,
        class: params.class_filter(),
        page: params.page_request(),
    };

    let page = state
        .app_bus
        .query(query, SearchRankingsHandler::new())
        .await?;
    Ok(Json(page.into()))
}
