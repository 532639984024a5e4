// LLM prompt for cover letter generation. Placeholders are filled from the
// request plus the user's profile; output is markdown, stored verbatim.

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a highly professional, unique, and compelling cover letter for a {job_title} position at {company_name}.

About the candidate:
- Name: {applicant_name}
- Email: {applicant_email}
- Phone: {applicant_phone}
- Location: {applicant_location}
- LinkedIn: {applicant_linkedin}
- Industry: {industry}
- Years of Experience: {years_of_experience}
- Key Skills: {key_skills}
- Relevant Experience: {relevant_experience}
- Tone Preference: {tone}
- Focus Area: {focus}

Job Description:
{job_description}

Requirements:
1. Use a {tone} tone throughout the letter
2. Focus primarily on {focus} aspects
3. Start with a strong, tailored opening that grabs attention and references the company/role
4. Highlight the most relevant skills and experience, using specific, quantifiable achievements where possible
5. Show deep understanding of the company's needs and culture
6. Vary sentence structure and vocabulary to avoid generic or repetitive phrasing
7. End with a memorable, personalized closing that invites further discussion
8. Do NOT repeat content or structure from previous cover letters; make each letter unique and tailored
9. Keep it concise (max 400 words)
10. Use proper business letter formatting in markdown with the applicant's contact information
11. Avoid cliches and generic statements. Be specific and authentic
12. Include the applicant's name, email, and phone in the header if provided

Format the letter in markdown with proper business letter structure including contact information header."#;
