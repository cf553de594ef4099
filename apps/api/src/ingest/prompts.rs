// Resume summarization prompt templates.

pub const SUMMARY_SYSTEM: &str = "\
You are a recruiting assistant who condenses resumes into short review cards. \
Respond with Markdown only — no preamble, no closing remarks. \
Report only what the resume states; never invent names, contact details, employers or dates.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize the following resume for a recruiter deciding whether to advance the candidate.

RESUME TEXT:
{resume_text}

OUTPUT FORMAT (Markdown, exactly these sections in this order):
## <Candidate name>
<email> · <phone> · <location> (omit any item the resume does not give)

### Summary
A short paragraph (3-4 sentences) describing the candidate's background, seniority and focus.

### Qualifications
- One bullet per notable strength: skills, experience, education, achievements.

### Concerns
- One bullet per potential concern: gaps, missing requirements, short tenures, unclear claims.
- If nothing stands out, write a single bullet "None noted".

If the resume text is empty or unreadable, say so under Summary and leave the other sections with a single bullet "Not available"."#;

pub fn build_summary_prompt(resume_text: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{resume_text}", resume_text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_text() {
        let prompt = build_summary_prompt("  Jane Doe\nRust engineer  ");
        assert!(prompt.contains("RESUME TEXT:\nJane Doe\nRust engineer\n"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_prompt_requests_all_sections() {
        let prompt = build_summary_prompt("x");
        for section in ["## <Candidate name>", "### Summary", "### Qualifications", "### Concerns"] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_empty_text_still_builds_prompt() {
        let prompt = build_summary_prompt("");
        assert!(prompt.contains("RESUME TEXT:\n\n"));
    }
}
