#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. The structured sections (contact info, experience,
/// education, projects, achievements) are owned by the resume-builder UI
/// and persisted verbatim as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub contact_info: Value,
    pub skills: Value,
    pub experience: Value,
    pub education: Value,
    pub projects: Value,
    pub achievements: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
