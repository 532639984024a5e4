//! Axum route handlers for the Advisor API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;

use crate::advisor::{
    fetch_leetcode_stats, practice_recommendation, resume_review, skill_gap_analysis,
    LeetcodeStats, PracticeRequest, SkillGapRequest,
};
use crate::errors::AppError;
use crate::llm_client::Attachment;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SkillGapResponse {
    pub gap: String,
}

#[derive(Serialize)]
pub struct ResumeReviewResponse {
    pub review: String,
}

#[derive(Serialize)]
pub struct PracticeResponse {
    pub recommendation: String,
}

/// POST /api/v1/advisor/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "target_role is required for skill gap analysis".to_string(),
        ));
    }
    let gap = skill_gap_analysis(&state.llm, &request).await?;
    Ok(Json(SkillGapResponse { gap }))
}

/// POST /api/v1/advisor/resume-review
///
/// Multipart form: `resume_image` (PNG/JPEG only), optional
/// `target_company` and `target_role`. The media type is rejected before
/// any model call.
pub async fn handle_resume_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeReviewResponse>, AppError> {
    let mut image: Option<Attachment> = None;
    let mut target_company: Option<String> = None;
    let mut target_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_image") => {
                let media_type = field
                    .content_type()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::Validation("resume_image is missing a content type".to_string())
                    })?;
                if !Attachment::is_supported(&media_type) {
                    return Err(AppError::Validation(
                        "Only PNG, JPG, and JPEG images are allowed.".to_string(),
                    ));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;
                image = Some(Attachment { media_type, data });
            }
            Some("target_company") => {
                target_company = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read target_company: {e}"))
                })?);
            }
            Some("target_role") => {
                target_role = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read target_role: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("No image uploaded".to_string()))?;

    let review = resume_review(
        &state.llm,
        &image,
        target_company.as_deref().filter(|s| !s.is_empty()),
        target_role.as_deref().filter(|s| !s.is_empty()),
    )
    .await?;

    Ok(Json(ResumeReviewResponse { review }))
}

/// POST /api/v1/advisor/practice
pub async fn handle_practice(
    State(state): State<AppState>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<PracticeResponse>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role is required".to_string()));
    }
    let recommendation = practice_recommendation(&state.llm, &request).await?;
    Ok(Json(PracticeResponse { recommendation }))
}

/// GET /api/v1/leetcode/:username
///
/// Proxies the public LeetCode stats API, returning the typed subset.
pub async fn handle_leetcode_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<LeetcodeStats>, AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Missing username".to_string()));
    }
    Ok(Json(fetch_leetcode_stats(&state.http, &username).await?))
}
