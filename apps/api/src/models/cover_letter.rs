#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated cover letter plus the inputs it was generated from.
/// `content` is the model's markdown output, stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub job_description: String,
    pub company_name: String,
    pub job_title: String,
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
    pub status: String,
    pub created_at: DateTime<Utc>,
}
