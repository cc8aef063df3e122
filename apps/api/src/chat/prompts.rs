// All LLM prompt constants for the Chat module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{clamp_chars, GROUNDING_INSTRUCTION, MAX_CONTEXT_CHARS};

/// System prompt for free-form questions about an uploaded resume.
pub const CHAT_SYSTEM: &str = "You are a helpful career assistant. \
    You answer questions about a candidate's resume and give concrete, honest advice. \
    Keep answers concise and use plain text or short bullet lists.";

/// System prompt for resume/job matching. Combined with `JSON_ONLY_SYSTEM` at call time.
pub const MATCH_SYSTEM: &str = "You are an experienced technical recruiter \
    comparing a resume against a job description.";

/// Match instructions and output schema. The resume and job description follow.
pub const MATCH_INSTRUCTIONS: &str = r#"Compare the resume with the job description and return a JSON object with this EXACT schema:
{
  "match_score": 72,
  "strengths": ["5 years of Rust matches the core requirement"],
  "gaps": ["No Kubernetes experience mentioned"],
  "recommendations": ["Highlight the distributed systems project"],
  "summary": "One or two sentences."
}

match_score is an integer from 0 to 100."#;

/// Builds the user turn for a chat request. Without a resume the message is
/// passed through unchanged.
pub fn build_chat_prompt(
    message: &str,
    resume_context: Option<&str>,
    job_description: Option<&str>,
) -> String {
    let message = message.trim();
    let resume = resume_context.map(str::trim).filter(|c| !c.is_empty());
    let job = job_description.map(str::trim).filter(|j| !j.is_empty());

    if resume.is_none() && job.is_none() {
        return message.to_string();
    }

    let mut prompt = String::new();
    if let Some(resume) = resume {
        prompt.push_str(GROUNDING_INSTRUCTION);
        prompt.push_str("\n\nRESUME:\n");
        prompt.push_str(clamp_chars(resume, MAX_CONTEXT_CHARS));
        prompt.push_str("\n\n");
    }
    if let Some(job) = job {
        prompt.push_str("JOB DESCRIPTION:\n");
        prompt.push_str(job);
        prompt.push_str("\n\n");
    }
    prompt.push_str("QUESTION:\n");
    prompt.push_str(message);
    prompt
}

pub fn build_match_prompt(resume_context: &str, job_description: &str) -> String {
    format!(
        "{GROUNDING_INSTRUCTION}\n\n{MATCH_INSTRUCTIONS}\n\nRESUME:\n{}\n\nJOB DESCRIPTION:\n{}",
        clamp_chars(resume_context.trim(), MAX_CONTEXT_CHARS),
        job_description.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_passes_through() {
        assert_eq!(build_chat_prompt("  Hello  ", None, Some("  ")), "Hello");
    }

    #[test]
    fn test_resume_context_is_embedded_before_question() {
        let prompt = build_chat_prompt(
            "What is the candidate's strongest skill?",
            Some("PAGES: 1\n\n--- PAGE 1 ---\nSkills: Rust"),
            None,
        );
        assert!(prompt.starts_with(GROUNDING_INSTRUCTION));
        let resume_at = prompt.find("RESUME:\nPAGES: 1").unwrap();
        let question_at = prompt
            .find("QUESTION:\nWhat is the candidate's strongest skill?")
            .unwrap();
        assert!(resume_at < question_at);
        assert!(!prompt.contains("JOB DESCRIPTION"));
    }

    #[test]
    fn test_job_description_without_resume() {
        let prompt = build_chat_prompt("Is this senior?", None, Some("Staff engineer, Rust"));
        assert!(prompt.starts_with("JOB DESCRIPTION:\nStaff engineer, Rust"));
        assert!(!prompt.contains("RESUME:"));
    }

    #[test]
    fn test_match_prompt_fills_placeholders() {
        let prompt = build_match_prompt("Skills: Rust", "Need Rust");
        assert!(prompt.contains("RESUME:\nSkills: Rust"));
        assert!(prompt.contains("JOB DESCRIPTION:\nNeed Rust"));
        assert!(prompt.starts_with(GROUNDING_INSTRUCTION));
        assert!(!prompt.contains("{resume}"));
    }

    #[test]
    fn test_match_prompt_keeps_placeholders_in_user_text_literal() {
        let prompt = build_match_prompt("Skills: Rust", "Paste {resume} here");
        assert!(prompt.contains("JOB DESCRIPTION:\nPaste {resume} here"));
        assert_eq!(prompt.matches("Skills: Rust").count(), 1);
    }
}
