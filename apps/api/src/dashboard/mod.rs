//! Industry insight dashboard.
//!
//! Insights are generated per industry (not per user), cached in the
//! `industry_insights` table, and refreshed weekly. The generated shape is
//! validated by typed deserialization before anything is persisted.

pub mod handlers;
pub mod prompts;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dashboard::prompts::INSIGHTS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::FallbackClient;
use crate::models::insight::InsightRow;
use crate::users::get_user;

/// Cached insights are considered fresh for one week.
const REFRESH_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

/// The structured insight payload the model must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsights {
    pub salary_ranges: Vec<SalaryRange>,
    /// Percentage.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

impl DemandLevel {
    fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }
}

impl MarketOutlook {
    fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }
}

/// Generates fresh insights for an industry. JSON mode — a malformed model
/// response surfaces as a generation error, never a partially stored row.
pub async fn generate_insights(
    llm: &FallbackClient,
    industry: &str,
) -> Result<IndustryInsights, AppError> {
    let prompt = INSIGHTS_PROMPT_TEMPLATE.replace("{industry}", industry);
    Ok(llm.generate_json::<IndustryInsights>(&prompt).await?)
}

/// Returns the insights for the user's industry, generating them on first
/// access and regenerating once `next_update` has passed.
pub async fn get_or_refresh_insights(
    pool: &PgPool,
    llm: &FallbackClient,
    user_id: Uuid,
) -> Result<InsightRow, AppError> {
    let user = get_user(pool, user_id).await?;
    let industry = user
        .industry
        .ok_or_else(|| AppError::Validation("User industry not set".to_string()))?;

    let existing =
        sqlx::query_as::<_, InsightRow>("SELECT * FROM industry_insights WHERE industry = $1")
            .bind(&industry)
            .fetch_optional(pool)
            .await?;

    match existing {
        Some(row) if row.next_update > Utc::now() => Ok(row),
        Some(_) => {
            info!("Insights for '{industry}' are stale, regenerating");
            refresh_industry(pool, llm, &industry).await
        }
        None => {
            info!("No insights for '{industry}' yet, generating");
            refresh_industry(pool, llm, &industry).await
        }
    }
}

/// Regenerates insights for the user's industry unconditionally.
pub async fn force_refresh_insights(
    pool: &PgPool,
    llm: &FallbackClient,
    user_id: Uuid,
) -> Result<InsightRow, AppError> {
    let user = get_user(pool, user_id).await?;
    let industry = user
        .industry
        .ok_or_else(|| AppError::Validation("User industry not set".to_string()))?;
    refresh_industry(pool, llm, &industry).await
}

async fn refresh_industry(
    pool: &PgPool,
    llm: &FallbackClient,
    industry: &str,
) -> Result<InsightRow, AppError> {
    let insights = generate_insights(llm, industry).await?;

    let now = Utc::now();
    let next_update = now + Duration::days(REFRESH_INTERVAL_DAYS);
    let salary_ranges = serde_json::to_value(&insights.salary_ranges)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize salaries: {e}")))?;

    let row = sqlx::query_as::<_, InsightRow>(
        r#"
        INSERT INTO industry_insights
            (industry, salary_ranges, growth_rate, demand_level, top_skills,
             market_outlook, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (industry) DO UPDATE SET
            salary_ranges = EXCLUDED.salary_ranges,
            growth_rate = EXCLUDED.growth_rate,
            demand_level = EXCLUDED.demand_level,
            top_skills = EXCLUDED.top_skills,
            market_outlook = EXCLUDED.market_outlook,
            key_trends = EXCLUDED.key_trends,
            recommended_skills = EXCLUDED.recommended_skills,
            last_updated = EXCLUDED.last_updated,
            next_update = EXCLUDED.next_update
        RETURNING *
        "#,
    )
    .bind(industry)
    .bind(&salary_ranges)
    .bind(insights.growth_rate)
    .bind(insights.demand_level.as_str())
    .bind(&insights.top_skills)
    .bind(insights.market_outlook.as_str())
    .bind(&insights.key_trends)
    .bind(&insights.recommended_skills)
    .bind(now)
    .bind(next_update)
    .fetch_one(pool)
    .await?;

    info!(
        "Insights for '{industry}' refreshed, next update {}",
        row.next_update
    );
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_deserialize_from_model_shape() {
        let json = serde_json::json!({
            "salaryRanges": [
                {"role": "Backend Engineer", "min": 90000.0, "max": 180000.0,
                 "median": 130000.0, "location": "US Remote"}
            ],
            "growthRate": 12.5,
            "demandLevel": "High",
            "topSkills": ["Rust", "PostgreSQL"],
            "marketOutlook": "Positive",
            "keyTrends": ["AI tooling"],
            "recommendedSkills": ["Kubernetes"]
        });

        let insights: IndustryInsights = serde_json::from_value(json).unwrap();
        assert_eq!(insights.salary_ranges.len(), 1);
        assert_eq!(insights.demand_level, DemandLevel::High);
        assert_eq!(insights.market_outlook, MarketOutlook::Positive);
    }

    #[test]
    fn test_unknown_demand_level_is_rejected() {
        let json = serde_json::json!({
            "salaryRanges": [],
            "growthRate": 1.0,
            "demandLevel": "Extreme",
            "topSkills": [],
            "marketOutlook": "Neutral",
            "keyTrends": [],
            "recommendedSkills": []
        });
        assert!(serde_json::from_value::<IndustryInsights>(json).is_err());
    }

    #[test]
    fn test_enum_storage_strings_round_trip() {
        assert_eq!(DemandLevel::Medium.as_str(), "Medium");
        assert_eq!(MarketOutlook::Negative.as_str(), "Negative");
    }
}
