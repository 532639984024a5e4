#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. `external_id` is the identity-provider subject;
/// authentication itself happens upstream of this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<i32>,
    pub skills: Vec<String>,
    pub target_role: Option<String>,
    pub leetcode_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
