//! Axum route handlers for the Users API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::{get_user, is_onboarded, register_user, update_profile};
use crate::users::{RegisterRequest, UpdateProfileRequest};

#[derive(Serialize)]
pub struct OnboardingStatusResponse {
    pub is_onboarded: bool,
}

/// POST /api/v1/users
///
/// Registration intake from the identity provider webhook.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<User>, AppError> {
    let user = register_user(
        &state.db,
        &state.mailer,
        &state.config.contact_inbox,
        request,
    )
    .await?;
    Ok(Json(user))
}

/// GET /api/v1/users/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(get_user(&state.db, user_id).await?))
}

/// PUT /api/v1/users/:user_id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(update_profile(&state.db, user_id, request).await?))
}

/// GET /api/v1/users/:user_id/onboarding
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OnboardingStatusResponse>, AppError> {
    Ok(Json(OnboardingStatusResponse {
        is_onboarded: is_onboarded(&state.db, user_id).await?,
    }))
}
