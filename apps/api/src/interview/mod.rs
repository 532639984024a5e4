//! Mock interviews: quiz generation, assessment scoring, and feedback.
//!
//! Quiz content comes entirely from the model; this module owns the prompt,
//! the taxonomy validation, and the persisted assessment records.

pub mod handlers;
pub mod prompts;
pub mod quiz;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::{IMPROVEMENT_TIP_TEMPLATE, QUIZ_PROMPT_TEMPLATE};
use crate::interview::quiz::{normalize_quiz, QuizQuestion, QuizTaxonomy};
use crate::llm_client::FallbackClient;
use crate::models::assessment::AssessmentRow;
use crate::users::get_user;

/// Per-question outcome stored with an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub answer: Option<String>,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Generates a quiz for the user, targeting an explicit role/company when
/// given and falling back to the user's industry otherwise.
pub async fn generate_quiz_for_user(
    pool: &PgPool,
    llm: &FallbackClient,
    user_id: Uuid,
    company: Option<String>,
    role: Option<String>,
) -> Result<QuizTaxonomy, AppError> {
    let user = get_user(pool, user_id).await?;

    let target = role
        .or(user.industry)
        .unwrap_or_default();
    let prompt = QUIZ_PROMPT_TEMPLATE
        .replace("{role}", &target)
        .replace("{company}", company.as_deref().unwrap_or(""));

    let mut quiz: QuizTaxonomy = llm.generate_json(&prompt).await?;
    let summary = normalize_quiz(&mut quiz);
    info!(
        "Generated quiz with {} valid questions for user {user_id}",
        summary.total_questions
    );

    Ok(quiz)
}

/// Scores the answered questions, generates an improvement tip from the
/// wrong ones, and persists the assessment.
///
/// Tip generation is best-effort: a generation failure is logged and the
/// assessment is saved without a tip.
pub async fn save_quiz_result(
    pool: &PgPool,
    llm: &FallbackClient,
    user_id: Uuid,
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<String>>,
    score: f64,
) -> Result<AssessmentRow, AppError> {
    let user = get_user(pool, user_id).await?;

    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = answers.get(i).cloned().flatten();
            QuestionResult {
                question: q.question.clone(),
                answer: q.correct_answer.clone(),
                user_answer: user_answer.clone(),
                is_correct: q.correct_answer.is_some() && q.correct_answer == user_answer,
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let wrong: Vec<&QuestionResult> = results.iter().filter(|r| !r.is_correct).collect();
    let improvement_tip = if wrong.is_empty() {
        None
    } else {
        match generate_improvement_tip(llm, user.industry.as_deref().unwrap_or(""), &wrong).await {
            Ok(tip) => Some(tip),
            Err(e) => {
                warn!("Improvement tip generation failed, saving without tip: {e}");
                None
            }
        }
    };

    let questions_value = serde_json::to_value(&results)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize results: {e}")))?;

    let assessment = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (id, user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, 'Technical', $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(score)
    .bind(&questions_value)
    .bind(&improvement_tip)
    .fetch_one(pool)
    .await?;

    Ok(assessment)
}

pub async fn list_assessments(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AssessmentRow>, AppError> {
    let assessments = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(assessments)
}

/// Forwards a caller-built feedback prompt and returns the trimmed text.
pub async fn interview_feedback(
    llm: &FallbackClient,
    feedback_prompt: &str,
) -> Result<String, AppError> {
    let generation = llm.generate(feedback_prompt).await?;
    Ok(generation.text.trim().to_string())
}

async fn generate_improvement_tip(
    llm: &FallbackClient,
    industry: &str,
    wrong: &[&QuestionResult],
) -> Result<String, AppError> {
    let wrong_questions = wrong
        .iter()
        .map(|r| {
            format!(
                "Question: {}\nCorrect Answer: \"{}\"\nUser Answer: {}",
                r.question,
                r.answer.as_deref().unwrap_or(""),
                r.user_answer.as_deref().unwrap_or("(no answer)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = IMPROVEMENT_TIP_TEMPLATE
        .replace("{industry}", industry)
        .replace("{wrong_questions}", &wrong_questions);

    let generation = llm.generate(&prompt).await?;
    Ok(generation.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(question: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            correct_answer: Some(correct.to_string()),
            explanation: None,
        }
    }

    #[test]
    fn test_question_results_score_against_recorded_answer() {
        let questions = vec![mcq("Q1", "A"), mcq("Q2", "B")];
        let answers = vec![Some("A".to_string()), Some("A".to_string())];

        let results: Vec<QuestionResult> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let user_answer = answers.get(i).cloned().flatten();
                QuestionResult {
                    question: q.question.clone(),
                    answer: q.correct_answer.clone(),
                    user_answer: user_answer.clone(),
                    is_correct: q.correct_answer.is_some() && q.correct_answer == user_answer,
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        assert!(results[0].is_correct);
        assert!(!results[1].is_correct);
    }

    #[test]
    fn test_behavioral_question_without_answer_is_not_correct() {
        // Behavioral questions carry no correct answer; they never score.
        let q = QuizQuestion {
            question: "Tell me about a time...".to_string(),
            options: vec![],
            correct_answer: None,
            explanation: Some("STAR".to_string()),
        };
        let is_correct = q.correct_answer.is_some() && q.correct_answer == None;
        assert!(!is_correct);
    }

    #[test]
    fn test_question_result_serializes_for_storage() {
        let result = QuestionResult {
            question: "Q".to_string(),
            answer: Some("A".to_string()),
            user_answer: Some("B".to_string()),
            is_correct: false,
            explanation: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["is_correct"], serde_json::json!(false));
        assert_eq!(value["user_answer"], serde_json::json!("B"));
    }
}
