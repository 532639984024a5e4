//! Career advisor: skill-gap analysis, resume review, and coding-practice
//! recommendations.
//!
//! All three flows return markdown narratives produced entirely by the
//! model (plain-text mode, trimmed). The resume review is the one
//! multimodal call site: the uploaded image travels as an inline
//! attachment.

pub mod handlers;
pub mod prompts;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::advisor::prompts::{
    COACH_PERSONA, PRACTICE_INSTRUCTIONS, RESUME_REVIEW_INSTRUCTIONS, SKILL_GAP_INSTRUCTIONS,
};
use crate::errors::AppError;
use crate::llm_client::prompts::MARKDOWN_COACH_STYLE;
use crate::llm_client::{Attachment, FallbackClient};

const LEETCODE_STATS_API: &str = "https://leetcode-stats-api.herokuapp.com";

/// Solved-count subset of the public LeetCode stats API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeStats {
    pub total_solved: u32,
    pub total_questions: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub target_role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub leetcode_stats: Option<LeetcodeStats>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PracticeRequest {
    pub target_role: String,
    pub leetcode_stats: Option<LeetcodeStats>,
    pub resume_text: Option<String>,
}

/// Markdown narrative of the user's readiness for a target role.
pub async fn skill_gap_analysis(
    llm: &FallbackClient,
    request: &SkillGapRequest,
) -> Result<String, AppError> {
    let generation = llm.generate(&build_skill_gap_prompt(request)).await?;
    Ok(generation.text.trim().to_string())
}

/// Markdown review of an uploaded resume image, optionally targeted at a
/// company and role. The attachment's media type is validated by the
/// handler before this is called.
pub async fn resume_review(
    llm: &FallbackClient,
    attachment: &Attachment,
    target_company: Option<&str>,
    target_role: Option<&str>,
) -> Result<String, AppError> {
    let prompt = build_resume_review_prompt(target_company, target_role);
    let generation = llm.generate_with_attachment(&prompt, attachment).await?;
    Ok(generation.text.trim().to_string())
}

/// Markdown coaching text from LeetCode stats and optional resume text.
pub async fn practice_recommendation(
    llm: &FallbackClient,
    request: &PracticeRequest,
) -> Result<String, AppError> {
    let generation = llm.generate(&build_practice_prompt(request)).await?;
    Ok(generation.text.trim().to_string())
}

/// Fetches solved-count stats for a username from the public stats API.
pub async fn fetch_leetcode_stats(
    http: &Client,
    username: &str,
) -> Result<LeetcodeStats, AppError> {
    let response = http
        .get(format!("{LEETCODE_STATS_API}/{username}"))
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("LeetCode stats request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "LeetCode stats API returned {}",
            response.status()
        )));
    }

    response
        .json::<LeetcodeStats>()
        .await
        .map_err(|e| AppError::Upstream(format!("LeetCode stats response malformed: {e}")))
}

fn format_stats(stats: &LeetcodeStats) -> String {
    format!(
        "Total Solved: {} out of {} (Easy: {}, Medium: {}, Hard: {})",
        stats.total_solved,
        stats.total_questions,
        stats.easy_solved,
        stats.medium_solved,
        stats.hard_solved
    )
}

fn build_skill_gap_prompt(request: &SkillGapRequest) -> String {
    let mut prompt = format!(
        "{COACH_PERSONA} Analyze the user's readiness for the role of **{}**.\n",
        request.target_role
    );
    if !request.skills.is_empty() {
        prompt.push_str(&format!("\n**Current Skills:** {}", request.skills.join(", ")));
    }
    if let Some(stats) = &request.leetcode_stats {
        prompt.push_str(&format!("\n**LeetCode Stats:** {}", format_stats(stats)));
    }
    if let Some(resume_text) = &request.resume_text {
        prompt.push_str(&format!("\n**Resume:**\n{resume_text}"));
    }
    prompt.push_str(&format!(
        "\n\n---\n\n**Instructions:**\n{MARKDOWN_COACH_STYLE}\n{SKILL_GAP_INSTRUCTIONS}\n"
    ));
    prompt
}

fn build_resume_review_prompt(
    target_company: Option<&str>,
    target_role: Option<&str>,
) -> String {
    let mut prompt = format!("{COACH_PERSONA} Analyze the user's resume (image attached)");
    match (target_company, target_role) {
        (Some(company), Some(role)) => {
            prompt.push_str(&format!(" for a role at **{company}** as **{role}**"));
        }
        (Some(company), None) => prompt.push_str(&format!(" for a role at **{company}**")),
        (None, Some(role)) => prompt.push_str(&format!(" for the role of **{role}**")),
        (None, None) => prompt.push_str(" for the role they are targeting."),
    }
    prompt.push_str(&format!(
        "\n\n---\n\n**Instructions:**\n{MARKDOWN_COACH_STYLE}\n{RESUME_REVIEW_INSTRUCTIONS}\n"
    ));
    prompt
}

fn build_practice_prompt(request: &PracticeRequest) -> String {
    let mut prompt = format!(
        "{COACH_PERSONA} Analyze the user's LeetCode stats{} for the role of **{}**.\n",
        if request.resume_text.is_some() {
            " and resume"
        } else {
            ""
        },
        request.target_role
    );
    let stats_line = request
        .leetcode_stats
        .as_ref()
        .map(format_stats)
        .unwrap_or_else(|| {
            "Total Solved: 0 out of 0 (Easy: 0, Medium: 0, Hard: 0)".to_string()
        });
    prompt.push_str(&format!("\n**LeetCode Stats:** {stats_line}."));
    if let Some(resume_text) = &request.resume_text {
        prompt.push_str(&format!("\n**Resume:**\n{resume_text}"));
    }
    prompt.push_str(&format!(
        "\n\n---\n\n**Instructions:**\n{MARKDOWN_COACH_STYLE}\n{PRACTICE_INSTRUCTIONS}\n"
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> LeetcodeStats {
        LeetcodeStats {
            total_solved: 150,
            total_questions: 3000,
            easy_solved: 80,
            medium_solved: 60,
            hard_solved: 10,
        }
    }

    #[test]
    fn test_stats_deserialize_from_upstream_shape() {
        let json = serde_json::json!({
            "totalSolved": 150,
            "totalQuestions": 3000,
            "easySolved": 80,
            "mediumSolved": 60,
            "hardSolved": 10
        });
        let parsed: LeetcodeStats = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.total_solved, 150);
        assert_eq!(parsed.hard_solved, 10);
    }

    #[test]
    fn test_skill_gap_prompt_includes_optional_sections_only_when_present() {
        let request = SkillGapRequest {
            target_role: "Data Engineer".to_string(),
            skills: vec!["Python".to_string()],
            leetcode_stats: Some(stats()),
            resume_text: None,
        };
        let prompt = build_skill_gap_prompt(&request);
        assert!(prompt.contains("**Data Engineer**"));
        assert!(prompt.contains("**Current Skills:** Python"));
        assert!(prompt.contains("Total Solved: 150 out of 3000"));
        assert!(!prompt.contains("**Resume:**"));
    }

    #[test]
    fn test_resume_review_prompt_target_variants() {
        let both = build_resume_review_prompt(Some("Acme"), Some("SRE"));
        assert!(both.contains("for a role at **Acme** as **SRE**"));

        let company_only = build_resume_review_prompt(Some("Acme"), None);
        assert!(company_only.contains("for a role at **Acme**"));
        assert!(!company_only.contains("as **"));

        let neither = build_resume_review_prompt(None, None);
        assert!(neither.contains("for the role they are targeting."));
    }

    #[test]
    fn test_practice_prompt_defaults_missing_stats_to_zero() {
        let request = PracticeRequest {
            target_role: "Backend Engineer".to_string(),
            leetcode_stats: None,
            resume_text: None,
        };
        let prompt = build_practice_prompt(&request);
        assert!(prompt.contains("Total Solved: 0 out of 0"));
        assert!(!prompt.contains(" and resume"));
    }
}
