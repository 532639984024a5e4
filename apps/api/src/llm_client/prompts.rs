#![allow(dead_code)]

// Shared prompt fragments. Each feature module that calls the LLM defines
// its own prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Instruction appended to every prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    IMPORTANT: Return ONLY the JSON. No additional text, notes, or markdown formatting.";

/// Shared markdown formatting rules for the advisor-style narrative outputs.
/// The UI renders these responses as markdown directly.
pub const MARKDOWN_COACH_STYLE: &str = "\
- Use section headings with relevant emojis (e.g., '\u{2705} Strengths', '\u{1F3AF} Areas for Growth', '\u{1F6E0}\u{FE0F} Action Plan', '\u{1F4A1} Recommended Resources', '\u{1F680} Next Steps').
- For inner points, use clear bullet points (with or without emojis) or numbered lists, whichever is most readable for the content.
- Add a blank line between each bullet/numbered point and section for readability.
- Use markdown for all formatting (headings, bold, lists).
- Make your advice concise, visually clear, and motivating.
- End with a motivating closing.";
