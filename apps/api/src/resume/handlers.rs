//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::{
    create_resume, delete_resume, duplicate_resume, get_resume, improve_points, latex_edit,
    list_resumes, update_resume, ResumePayload,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub payload: ResumePayload,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub entry_type: String,
    pub title: String,
    pub organization: String,
    pub current_points: Vec<String>,
}

#[derive(Serialize)]
pub struct ImproveResponse {
    pub improved_points: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LatexEditRequest {
    pub request: String,
    pub form_data: Value,
    pub current_latex: String,
}

#[derive(Serialize)]
pub struct LatexEditResponse {
    pub latex_code: String,
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(
        create_resume(&state.db, request.user_id, request.payload).await?,
    ))
}

/// GET /api/v1/users/:user_id/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(list_resumes(&state.db, user_id).await?))
}

/// GET /api/v1/users/:user_id/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path((user_id, resume_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(get_resume(&state.db, user_id, resume_id).await?))
}

/// PUT /api/v1/users/:user_id/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path((user_id, resume_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ResumePayload>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(
        update_resume(&state.db, user_id, resume_id, payload).await?,
    ))
}

/// DELETE /api/v1/users/:user_id/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path((user_id, resume_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_resume(&state.db, user_id, resume_id).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}

/// POST /api/v1/users/:user_id/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path((user_id, resume_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(duplicate_resume(&state.db, user_id, resume_id).await?))
}

/// POST /api/v1/resumes/improve
///
/// Rewrites a set of bullet points for one resume entry.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let improved_points = improve_points(
        &state.llm,
        &request.entry_type,
        &request.title,
        &request.organization,
        &request.current_points,
    )
    .await?;
    Ok(Json(ImproveResponse { improved_points }))
}

/// POST /api/v1/resumes/latex-edit
///
/// Applies a user-requested edit to the full LaTeX source.
pub async fn handle_latex_edit(
    State(state): State<AppState>,
    Json(request): Json<LatexEditRequest>,
) -> Result<Json<LatexEditResponse>, AppError> {
    if request.request.trim().is_empty() {
        return Err(AppError::Validation("request cannot be empty".to_string()));
    }
    let latex_code = latex_edit(
        &state.llm,
        &request.request,
        &request.form_data,
        &request.current_latex,
    )
    .await?;
    Ok(Json(LatexEditResponse { latex_code }))
}
