// LLM prompt for industry insight generation. Replace `{industry}` before
// sending. The shape is enforced again by typed deserialization.

pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{
  "salaryRanges": [
    { "role": "string", "min": number, "max": number, "median": number, "location": "string" }
  ],
  "growthRate": number,
  "demandLevel": "High" | "Medium" | "Low",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "Positive" | "Neutral" | "Negative",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

IMPORTANT: Return ONLY the JSON. No additional text, notes, or markdown formatting.
Include at least 5-10 common roles for salary ranges.
Growth rate should be a percentage.
Include at least 15-20 skills and trends."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_substitutes_industry() {
        let prompt = INSIGHTS_PROMPT_TEMPLATE.replace("{industry}", "fintech");
        assert!(prompt.contains("the fintech industry"));
        assert!(!prompt.contains("{industry}"));
    }
}
