//! Cover letter generation and storage.
//!
//! A cover letter is generated once from the request plus the user's
//! profile, stored verbatim as markdown, and never regenerated in place;
//! a failed generation stores nothing.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::FallbackClient;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::user::User;
use crate::users::get_user;

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub user_id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    pub applicant_location: Option<String>,
    pub applicant_linkedin: Option<String>,
    pub years_of_experience: Option<i32>,
    pub key_skills: Option<String>,
    pub relevant_experience: Option<String>,
    pub tone: String,
    pub focus: String,
}

/// Generates a cover letter and persists it together with the inputs it
/// was generated from.
pub async fn generate_cover_letter(
    pool: &PgPool,
    llm: &FallbackClient,
    request: CoverLetterRequest,
) -> Result<CoverLetterRow, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let user = get_user(pool, request.user_id).await?;
    let prompt = build_cover_letter_prompt(&request, &user);

    let generation = llm.generate(&prompt).await?;
    let content = generation.text.trim().to_string();
    info!(
        "Cover letter for user {} generated by model {}",
        request.user_id, generation.model
    );

    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters
            (id, user_id, content, job_description, company_name, job_title,
             applicant_name, applicant_email, applicant_phone, applicant_location,
             applicant_linkedin, years_of_experience, key_skills, relevant_experience,
             tone, focus, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, 'completed')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&content)
    .bind(&request.job_description)
    .bind(&request.company_name)
    .bind(&request.job_title)
    .bind(&request.applicant_name)
    .bind(&request.applicant_email)
    .bind(&request.applicant_phone)
    .bind(&request.applicant_location)
    .bind(&request.applicant_linkedin)
    .bind(request.years_of_experience)
    .bind(&request.key_skills)
    .bind(&request.relevant_experience)
    .bind(&request.tone)
    .bind(&request.focus)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    let letters = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(letters)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<CoverLetterRow, AppError> {
    sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

pub async fn delete_cover_letter(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }
    Ok(())
}

/// Request fields win over profile fields; the profile fills the gaps.
fn build_cover_letter_prompt(request: &CoverLetterRequest, user: &User) -> String {
    let years_of_experience = request
        .years_of_experience
        .or(user.experience)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Not provided".to_string());
    let key_skills = request
        .key_skills
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| user.skills.join(", "));
    let relevant_experience = request
        .relevant_experience
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| user.bio.clone())
        .unwrap_or_else(|| "Not provided".to_string());

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{company_name}", &request.company_name)
        .replace("{applicant_name}", &request.applicant_name)
        .replace("{applicant_email}", &request.applicant_email)
        .replace(
            "{applicant_phone}",
            request.applicant_phone.as_deref().unwrap_or("Not provided"),
        )
        .replace(
            "{applicant_location}",
            request
                .applicant_location
                .as_deref()
                .unwrap_or("Not provided"),
        )
        .replace(
            "{applicant_linkedin}",
            request
                .applicant_linkedin
                .as_deref()
                .unwrap_or("Not provided"),
        )
        .replace("{industry}", user.industry.as_deref().unwrap_or(""))
        .replace("{years_of_experience}", &years_of_experience)
        .replace("{key_skills}", &key_skills)
        .replace("{relevant_experience}", &relevant_experience)
        .replace("{tone}", &request.tone)
        .replace("{focus}", &request.focus)
        .replace("{job_description}", &request.job_description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            external_id: "ext_1".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            industry: Some("tech-software-development".to_string()),
            sub_industry: None,
            bio: Some("Ten years of backend work.".to_string()),
            experience: Some(10),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            target_role: None,
            leetcode_username: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_request() -> CoverLetterRequest {
        CoverLetterRequest {
            user_id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            job_title: "Staff Engineer".to_string(),
            job_description: "Build reliable systems.".to_string(),
            applicant_name: "Ada Lovelace".to_string(),
            applicant_email: "ada@example.com".to_string(),
            applicant_phone: None,
            applicant_location: None,
            applicant_linkedin: None,
            years_of_experience: None,
            key_skills: None,
            relevant_experience: None,
            tone: "professional".to_string(),
            focus: "technical".to_string(),
        }
    }

    #[test]
    fn test_prompt_falls_back_to_profile_fields() {
        let prompt = build_cover_letter_prompt(&sample_request(), &sample_user());
        assert!(prompt.contains("Years of Experience: 10"));
        assert!(prompt.contains("Key Skills: Rust, SQL"));
        assert!(prompt.contains("Relevant Experience: Ten years of backend work."));
    }

    #[test]
    fn test_prompt_prefers_request_fields_over_profile() {
        let mut request = sample_request();
        request.years_of_experience = Some(3);
        request.key_skills = Some("Go".to_string());

        let prompt = build_cover_letter_prompt(&request, &sample_user());
        assert!(prompt.contains("Years of Experience: 3"));
        assert!(prompt.contains("Key Skills: Go"));
    }

    #[test]
    fn test_prompt_marks_missing_optional_fields() {
        let prompt = build_cover_letter_prompt(&sample_request(), &sample_user());
        assert!(prompt.contains("Phone: Not provided"));
        assert!(prompt.contains("LinkedIn: Not provided"));
    }
}
