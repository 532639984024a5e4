//! Axum route handlers for the Insights API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::dashboard::{force_refresh_insights, get_or_refresh_insights};
use crate::errors::AppError;
use crate::models::insight::InsightRow;
use crate::state::AppState;

/// GET /api/v1/users/:user_id/insights
///
/// Serves cached insights for the user's industry, generating or
/// regenerating them when missing or stale.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<InsightRow>, AppError> {
    Ok(Json(
        get_or_refresh_insights(&state.db, &state.llm, user_id).await?,
    ))
}

/// POST /api/v1/users/:user_id/insights/refresh
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<InsightRow>, AppError> {
    Ok(Json(
        force_refresh_insights(&state.db, &state.llm, user_id).await?,
    ))
}
