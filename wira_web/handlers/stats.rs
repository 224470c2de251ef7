use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use wira_app::{cqrs::queries::GetClassStats, queries_handlers::GetClassStatsHandler};
use wira_types::ranking::ClassStat;

use crate::{
    handlers::{ApiError, CurrentAccount},
    http::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassStatsResponse {
    pub data: Vec<ClassStat>,
}

/// GET /api/rankings/stats
pub async fn class_stats(
    State(state): State<AppState>,
    _account: CurrentAccount,
) -> Result<Json<ClassStatsResponse>, ApiError> {
    let data = state
        .app_bus
        .query(GetClassStats, GetClassStatsHandler::new())
        .await?;

    Ok(Json(ClassStatsResponse { data }))
}
