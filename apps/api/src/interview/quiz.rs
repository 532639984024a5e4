//! Quiz taxonomy and post-generation validation.
//!
//! The model returns a nested taxonomy: section → subsection → questions.
//! Validation drops entries without a usable `question` field and trims
//! each subsection to its expected cardinality. Undersized subsections are
//! accepted and logged, never fatal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Section → subsection → questions, exactly as generated.
pub type QuizTaxonomy = BTreeMap<String, BTreeMap<String, Vec<QuizQuestion>>>;

/// A single quiz question. Behavioral questions carry no options or
/// correct answer; multiple-choice questions carry both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Missing questions deserialize as empty and are dropped during
    /// normalization rather than failing the whole quiz.
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(
        default,
        rename = "correctAnswer",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Expected questions per subsection. Aptitude subsections carry three;
/// everything else, including subsections the model invents, carries two.
pub fn expected_question_count(section: &str, subsection: &str) -> usize {
    match (section, subsection) {
        ("Aptitude", "Logical Reasoning")
        | ("Aptitude", "Critical Reasoning")
        | ("Aptitude", "Quantitative Aptitude")
        | ("Aptitude", "Data Interpretation") => 3,
        _ => 2,
    }
}

/// Counters from one normalization pass. Surfaced in logs so silently
/// trimmed or missing output stays visible in diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct QuizSummary {
    pub total_questions: usize,
    pub removed_empty: usize,
    pub truncated: usize,
}

/// Validates a parsed quiz in place: removes empty questions, truncates
/// over-count subsections to their expected cardinality, and logs
/// subsections that came back short.
pub fn normalize_quiz(quiz: &mut QuizTaxonomy) -> QuizSummary {
    let mut summary = QuizSummary::default();

    for (section, subsections) in quiz.iter_mut() {
        for (subsection, questions) in subsections.iter_mut() {
            let before = questions.len();
            questions.retain(|q| {
                let text = q.question.trim();
                !text.is_empty() && text != "null"
            });
            summary.removed_empty += before - questions.len();

            let expected = expected_question_count(section, subsection);
            if questions.len() > expected {
                summary.truncated += questions.len() - expected;
                questions.truncate(expected);
            } else if questions.len() < expected {
                warn!(
                    "{section} > {subsection}: {} of {expected} expected questions",
                    questions.len()
                );
            }

            summary.total_questions += questions.len();
        }
    }

    if summary.removed_empty > 0 {
        warn!(
            "Removed {} empty questions during quiz validation",
            summary.removed_empty
        );
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_answer: Some("Option A".to_string()),
            explanation: Some("Because.".to_string()),
        }
    }

    fn quiz_with(section: &str, subsection: &str, questions: Vec<QuizQuestion>) -> QuizTaxonomy {
        let mut subsections = BTreeMap::new();
        subsections.insert(subsection.to_string(), questions);
        let mut quiz = BTreeMap::new();
        quiz.insert(section.to_string(), subsections);
        quiz
    }

    #[test]
    fn test_overlong_subsection_truncated_to_expected_count() {
        let five = (1..=5).map(|i| question(&format!("Q{i}"))).collect();
        let mut quiz = quiz_with("Aptitude", "Logical Reasoning", five);

        let summary = normalize_quiz(&mut quiz);

        let remaining = &quiz["Aptitude"]["Logical Reasoning"];
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].question, "Q1");
        assert_eq!(remaining[2].question, "Q3");
        assert_eq!(summary.truncated, 2);
        assert_eq!(summary.total_questions, 3);
    }

    #[test]
    fn test_empty_question_removed_and_not_counted() {
        let mut quiz = quiz_with(
            "CS Fundamentals",
            "DSA",
            vec![question("Real question"), question("  "), question("null")],
        );

        let summary = normalize_quiz(&mut quiz);

        assert_eq!(quiz["CS Fundamentals"]["DSA"].len(), 1);
        assert_eq!(summary.removed_empty, 2);
        assert_eq!(summary.total_questions, 1);
    }

    #[test]
    fn test_undersized_subsection_accepted() {
        let mut quiz = quiz_with("Aptitude", "Critical Reasoning", vec![question("Only one")]);

        let summary = normalize_quiz(&mut quiz);

        assert_eq!(quiz["Aptitude"]["Critical Reasoning"].len(), 1);
        assert_eq!(summary.truncated, 0);
        assert_eq!(summary.total_questions, 1);
    }

    #[test]
    fn test_unknown_subsection_defaults_to_two() {
        assert_eq!(expected_question_count("Aptitude", "Made Up"), 2);
        assert_eq!(expected_question_count("Some Section", "Whatever"), 2);
        assert_eq!(expected_question_count("Aptitude", "Data Interpretation"), 3);
    }

    #[test]
    fn test_empty_removal_happens_before_truncation() {
        // Three entries with one empty: the empty one is dropped first, so
        // both real questions survive the expected-count trim.
        let mut quiz = quiz_with(
            "Behavioral & Communication",
            "Behavioral",
            vec![question(""), question("A"), question("B")],
        );

        normalize_quiz(&mut quiz);

        let remaining = &quiz["Behavioral & Communication"]["Behavioral"];
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].question, "A");
    }

    #[test]
    fn test_question_without_question_field_deserializes_empty() {
        let parsed: QuizQuestion =
            serde_json::from_value(serde_json::json!({"explanation": "orphan"})).unwrap();
        assert!(parsed.question.is_empty());
    }

    #[test]
    fn test_taxonomy_parses_from_model_output() {
        let json = serde_json::json!({
            "Aptitude": {
                "Logical Reasoning": [
                    {
                        "question": "Which figure completes the series?",
                        "options": ["A", "B", "C", "D"],
                        "correctAnswer": "C",
                        "explanation": "The series rotates 90 degrees each step."
                    }
                ]
            },
            "Behavioral & Communication": {
                "Behavioral": [
                    {"question": "Tell me about a conflict you resolved.", "explanation": "STAR"}
                ]
            }
        });

        let quiz: QuizTaxonomy = serde_json::from_value(json).unwrap();
        assert_eq!(quiz["Aptitude"]["Logical Reasoning"].len(), 1);
        assert_eq!(
            quiz["Aptitude"]["Logical Reasoning"][0].correct_answer.as_deref(),
            Some("C")
        );
        assert!(quiz["Behavioral & Communication"]["Behavioral"][0]
            .options
            .is_empty());
    }
}
