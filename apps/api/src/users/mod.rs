//! User accounts and onboarding.
//!
//! Registration arrives from the identity provider's webhook after sign-up;
//! authentication itself is delegated entirely to that provider. Profile
//! fields beyond email are filled in during onboarding.

pub mod handlers;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::mailer::Mailer;
use crate::models::user::User;

/// Upper bound from the onboarding form.
const MAX_BIO_LEN: usize = 500;
const MAX_EXPERIENCE_YEARS: i32 = 50;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Partial profile update — only provided fields change.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub target_role: Option<String>,
    pub leetcode_username: Option<String>,
}

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// Creates the user row and sends the welcome mail plus an operator
/// notification. Re-delivered webhooks are absorbed by the upsert. A mail
/// failure does not lose the registration; it is logged and skipped.
pub async fn register_user(
    pool: &PgPool,
    mailer: &Mailer,
    operator_inbox: &str,
    request: RegisterRequest,
) -> Result<User, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, email, name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id) DO UPDATE SET email = EXCLUDED.email
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.external_id)
    .bind(&request.email)
    .bind(&request.name)
    .fetch_one(pool)
    .await?;

    info!("Registered user {} ({})", user.id, user.email);

    let name = user.name.as_deref().unwrap_or("User");
    let welcome = format!("Hi {name},\n\nThanks for registering at Ascent!");
    if let Err(e) = mailer.send(&user.email, "Welcome to Ascent!", &welcome).await {
        warn!("Welcome email for {} failed: {e}", user.email);
    }

    let notice = format!("User {name} ({}) just registered.", user.email);
    if let Err(e) = mailer.send(operator_inbox, "New User Registered", &notice).await {
        warn!("Registration notification failed: {e}");
    }

    Ok(user)
}

/// Applies a partial profile update. Fields absent from the request keep
/// their current value.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: UpdateProfileRequest,
) -> Result<User, AppError> {
    if let Some(bio) = &request.bio {
        if bio.len() > MAX_BIO_LEN {
            return Err(AppError::Validation(format!(
                "bio must be at most {MAX_BIO_LEN} characters"
            )));
        }
    }
    if let Some(experience) = request.experience {
        if !(0..=MAX_EXPERIENCE_YEARS).contains(&experience) {
            return Err(AppError::Validation(format!(
                "experience must be between 0 and {MAX_EXPERIENCE_YEARS} years"
            )));
        }
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            industry = COALESCE($2, industry),
            sub_industry = COALESCE($3, sub_industry),
            bio = COALESCE($4, bio),
            experience = COALESCE($5, experience),
            skills = COALESCE($6, skills),
            target_role = COALESCE($7, target_role),
            leetcode_username = COALESCE($8, leetcode_username),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&request.industry)
    .bind(&request.sub_industry)
    .bind(&request.bio)
    .bind(request.experience)
    .bind(&request.skills)
    .bind(&request.target_role)
    .bind(&request.leetcode_username)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    Ok(user)
}

/// A user counts as onboarded once their industry is set.
pub async fn is_onboarded(pool: &PgPool, user_id: Uuid) -> Result<bool, AppError> {
    let user = get_user(pool, user_id).await?;
    Ok(user.industry.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_with_all_fields_absent_deserializes() {
        let request: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(request.industry.is_none());
        assert!(request.skills.is_none());
    }

    #[test]
    fn test_update_request_partial_fields() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "industry": "tech-software-development",
            "skills": ["Rust", "SQL"],
            "experience": 4
        }))
        .unwrap();
        assert_eq!(request.industry.as_deref(), Some("tech-software-development"));
        assert_eq!(request.skills.as_deref(), Some(&["Rust".to_string(), "SQL".to_string()][..]));
        assert_eq!(request.experience, Some(4));
    }
}
