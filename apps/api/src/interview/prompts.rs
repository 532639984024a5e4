// All LLM prompt constants for the Interview module.

/// Quiz generation prompt. Replace `{role}` and `{company}` before sending.
/// The distribution is pinned per subsection; over-generation is trimmed
/// again after parsing, under-generation is accepted.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate a JSON mock interview quiz for a candidate applying for '{role}' at '{company}'.

CRITICAL: Generate ONLY the specified number of questions per subsection. DO NOT generate extra questions.

EXACT QUESTION DISTRIBUTION (DO NOT EXCEED):
- Aptitude > Logical Reasoning: EXACTLY 3 questions
- Aptitude > Critical Reasoning: EXACTLY 3 questions
- Aptitude > Quantitative Aptitude: EXACTLY 3 questions
- Aptitude > Data Interpretation: EXACTLY 3 questions
- CS Fundamentals > DSA: EXACTLY 2 questions
- CS Fundamentals > Operating Systems: EXACTLY 2 questions
- CS Fundamentals > Databases: EXACTLY 2 questions
- CS Fundamentals > Networking: EXACTLY 2 questions
- CS Fundamentals > OOP/Software Engineering: EXACTLY 2 questions
- Behavioral & Communication > Behavioral: EXACTLY 2 questions
- Behavioral & Communication > Situational: EXACTLY 2 questions
- Behavioral & Communication > Communication/Presentation: EXACTLY 2 questions

REQUIRED JSON STRUCTURE:
{
  "Aptitude": {
    "Logical Reasoning": [
      {
        "question": "Your actual question here",
        "options": ["Option A", "Option B", "Option C", "Option D"],
        "correctAnswer": "Option A",
        "explanation": "Why this is correct"
      }
    ],
    "Critical Reasoning": [],
    "Quantitative Aptitude": [],
    "Data Interpretation": []
  },
  "CS Fundamentals": {
    "DSA": [],
    "Operating Systems": [],
    "Databases": [],
    "Networking": [],
    "OOP/Software Engineering": []
  },
  "Behavioral & Communication": {
    "Behavioral": [
      {
        "question": "Your behavioral question here",
        "explanation": "What a strong answer covers"
      }
    ],
    "Situational": [],
    "Communication/Presentation": []
  }
}

IMPORTANT RULES:
1. Generate EXACTLY the number specified for each subsection
2. Do NOT generate extra questions beyond the specified count
3. Every question must have meaningful content
4. Aptitude and CS Fundamentals questions are multiple choice with exactly four options and one correctAnswer; Behavioral & Communication questions have no options
5. Use markdown formatting in questions: **bold**, *italic*, `code`, tables, etc.
6. Make questions specific to the '{role}' role
7. Return ONLY the JSON, no extra text"#;

/// Improvement-tip prompt for wrong answers. Replace `{industry}` and
/// `{wrong_questions}` before sending. Plain-text output.
pub const IMPROVEMENT_TIP_TEMPLATE: &str = r#"The user got the following {industry} technical interview questions wrong:

{wrong_questions}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by these wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes, instead focus on what to learn/practice."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_template_substitutes_role_and_company() {
        let prompt = QUIZ_PROMPT_TEMPLATE
            .replace("{role}", "Backend Engineer")
            .replace("{company}", "Acme");
        assert!(prompt.contains("'Backend Engineer' at 'Acme'"));
        assert!(!prompt.contains("{role}"));
        assert!(!prompt.contains("{company}"));
    }
}
