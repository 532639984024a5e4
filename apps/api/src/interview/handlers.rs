//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::quiz::{QuizQuestion, QuizTaxonomy};
use crate::interview::{
    generate_quiz_for_user, interview_feedback, list_assessments, save_quiz_result,
};
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub user_id: Uuid,
    pub company: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: QuizTaxonomy,
}

#[derive(Debug, Deserialize)]
pub struct SaveAssessmentRequest {
    pub user_id: Uuid,
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<Option<String>>,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback_prompt: String,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

/// POST /api/v1/quizzes
///
/// Generates a mock interview quiz for the user, optionally targeted at a
/// specific company and role.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>, AppError> {
    let quiz = generate_quiz_for_user(
        &state.db,
        &state.llm,
        request.user_id,
        request.company,
        request.role,
    )
    .await?;
    Ok(Json(GenerateQuizResponse { quiz }))
}

/// POST /api/v1/assessments
///
/// Scores an answered quiz and persists the assessment with an
/// AI-generated improvement tip when any answer was wrong.
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    Json(request): Json<SaveAssessmentRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let assessment = save_quiz_result(
        &state.db,
        &state.llm,
        request.user_id,
        request.questions,
        request.answers,
        request.score,
    )
    .await?;
    Ok(Json(assessment))
}

/// GET /api/v1/users/:user_id/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(list_assessments(&state.db, user_id).await?))
}

/// POST /api/v1/interviews/feedback
///
/// Forwards a caller-built feedback prompt through the fallback client.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if request.feedback_prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "feedback_prompt cannot be empty".to_string(),
        ));
    }
    let feedback = interview_feedback(&state.llm, &request.feedback_prompt).await?;
    Ok(Json(FeedbackResponse { feedback }))
}
