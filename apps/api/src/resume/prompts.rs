// All LLM prompt constants for the Resume module.

/// Bullet-point improvement prompt. Replace `{entry_type}`,
/// `{entry_type_lower}`, `{title}`, `{organization}` and `{points}` before
/// sending. Output is a JSON array of strings, one per input point.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve the following {entry_type_lower} points for a resume. Make them more impactful, specific, and professional.

{entry_type}: {title}
Organization: {organization}
Current Points:
{points}

Requirements:
1. Keep the same number of points
2. Use action verbs and quantify achievements where possible
3. Make each point unique and avoid repetition
4. Use concise, professional language
5. Return only the improved points as a JSON array of strings"#;

/// LaTeX edit prompt. Replace `{current_latex}`, `{request}` and
/// `{form_data}` before sending. Output is the complete LaTeX document.
pub const LATEX_EDIT_PROMPT_TEMPLATE: &str = r#"You are an expert LaTeX resume writer. The user has provided their resume data and wants you to improve or modify their LaTeX code.

Current LaTeX Code:
{current_latex}

User's Request: {request}

User's Resume Data:
{form_data}

Please provide an improved or modified LaTeX code based on the user's request.
- Keep the same document structure and commands
- Only modify what the user specifically requested
- Ensure all LaTeX syntax is correct
- Return ONLY the complete LaTeX code, no explanations or markdown formatting
- Make sure all user data is properly included in the output"#;
