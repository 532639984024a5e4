//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::cover_letter::{
    delete_cover_letter, generate_cover_letter, get_cover_letter, list_cover_letters,
    CoverLetterRequest,
};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::state::AppState;

/// POST /api/v1/cover-letters
///
/// Generates a cover letter and stores it with its inputs.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    Ok(Json(
        generate_cover_letter(&state.db, &state.llm, request).await?,
    ))
}

/// GET /api/v1/users/:user_id/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    Ok(Json(list_cover_letters(&state.db, user_id).await?))
}

/// GET /api/v1/users/:user_id/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CoverLetterRow>, AppError> {
    Ok(Json(get_cover_letter(&state.db, user_id, id).await?))
}

/// DELETE /api/v1/users/:user_id/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_cover_letter(&state.db, user_id, id).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}
