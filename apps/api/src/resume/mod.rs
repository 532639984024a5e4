//! Resume storage and AI-assisted editing.
//!
//! The structured resume document is owned by the builder UI and stored
//! verbatim; this module adds user-scoped CRUD plus two generation flows:
//! bullet-point improvement (JSON mode) and whole-document LaTeX editing
//! (plain-text mode).

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::FallbackClient;
use crate::models::resume::ResumeRow;
use crate::resume::prompts::{IMPROVE_PROMPT_TEMPLATE, LATEX_EDIT_PROMPT_TEMPLATE};

#[derive(Debug, Deserialize)]
pub struct ResumePayload {
    pub title: Option<String>,
    pub contact_info: Value,
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub experience: Value,
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub projects: Value,
    #[serde(default)]
    pub achievements: Value,
}

impl ResumePayload {
    /// Contact info must at least name the applicant and carry an email.
    fn validate(&self) -> Result<(), AppError> {
        let name = self.contact_info.get("name").and_then(Value::as_str);
        let email = self.contact_info.get("email").and_then(Value::as_str);
        if name.map_or(true, |n| n.trim().is_empty())
            || email.map_or(true, |e| e.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Name and email are required".to_string(),
            ));
        }
        Ok(())
    }
}

pub async fn create_resume(
    pool: &PgPool,
    user_id: Uuid,
    payload: ResumePayload,
) -> Result<ResumeRow, AppError> {
    payload.validate()?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, user_id, title, contact_info, skills, experience, education, projects, achievements)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.contact_info)
    .bind(&payload.skills)
    .bind(&payload.experience)
    .bind(&payload.education)
    .bind(&payload.projects)
    .bind(&payload.achievements)
    .fetch_one(pool)
    .await?;

    Ok(resume)
}

pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
    let resumes = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(resumes)
}

pub async fn get_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

pub async fn update_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    payload: ResumePayload,
) -> Result<ResumeRow, AppError> {
    payload.validate()?;

    sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes SET
            title = $3,
            contact_info = $4,
            skills = $5,
            experience = $6,
            education = $7,
            projects = $8,
            achievements = $9,
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.contact_info)
    .bind(&payload.skills)
    .bind(&payload.experience)
    .bind(&payload.education)
    .bind(&payload.projects)
    .bind(&payload.achievements)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

pub async fn delete_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }
    Ok(())
}

/// Copies an existing resume under a " (Copy)"-suffixed title.
pub async fn duplicate_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let source = get_resume(pool, user_id, resume_id).await?;
    let title = format!("{} (Copy)", source.title.as_deref().unwrap_or("Resume"));

    let copy = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, user_id, title, contact_info, skills, experience, education, projects, achievements)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&title)
    .bind(&source.contact_info)
    .bind(&source.skills)
    .bind(&source.experience)
    .bind(&source.education)
    .bind(&source.projects)
    .bind(&source.achievements)
    .fetch_one(pool)
    .await?;

    Ok(copy)
}

/// Rewrites the given bullet points via the model. JSON mode: the output
/// must parse as an array of strings.
pub async fn improve_points(
    llm: &FallbackClient,
    entry_type: &str,
    title: &str,
    organization: &str,
    current_points: &[String],
) -> Result<Vec<String>, AppError> {
    if current_points.is_empty() {
        return Err(AppError::Validation(
            "current_points cannot be empty".to_string(),
        ));
    }

    let prompt = build_improve_prompt(entry_type, title, organization, current_points);
    Ok(llm.generate_json::<Vec<String>>(&prompt).await?)
}

/// Applies a user-requested edit to the full LaTeX source. Plain-text
/// mode; the model returns the complete document.
pub async fn latex_edit(
    llm: &FallbackClient,
    request: &str,
    form_data: &Value,
    current_latex: &str,
) -> Result<String, AppError> {
    let form_data_json = serde_json::to_string_pretty(form_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize form data: {e}")))?;

    let prompt = LATEX_EDIT_PROMPT_TEMPLATE
        .replace("{current_latex}", current_latex)
        .replace("{request}", request)
        .replace("{form_data}", &form_data_json);

    let generation = llm.generate(&prompt).await?;
    Ok(generation.text.trim().to_string())
}

fn build_improve_prompt(
    entry_type: &str,
    title: &str,
    organization: &str,
    current_points: &[String],
) -> String {
    let points = current_points
        .iter()
        .enumerate()
        .map(|(i, point)| format!("{}. {point}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    IMPROVE_PROMPT_TEMPLATE
        .replace("{entry_type_lower}", &entry_type.to_lowercase())
        .replace("{entry_type}", entry_type)
        .replace("{title}", title)
        .replace("{organization}", organization)
        .replace("{points}", &points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_contact_name_and_email() {
        let payload: ResumePayload = serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "Ada Lovelace"}
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: ResumePayload = serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "Ada Lovelace", "email": "ada@example.com"}
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_blank_contact_fields_are_rejected() {
        let payload: ResumePayload = serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "  ", "email": "ada@example.com"}
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_improve_prompt_numbers_the_points() {
        let prompt = build_improve_prompt(
            "Experience",
            "Backend Engineer",
            "Acme",
            &["Built services".to_string(), "Fixed bugs".to_string()],
        );
        assert!(prompt.contains("1. Built services"));
        assert!(prompt.contains("2. Fixed bugs"));
        assert!(prompt.contains("experience points"));
        assert!(prompt.contains("Experience: Backend Engineer"));
    }
}
