// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended whenever a resume is embedded in a prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every statement about the candidate on the resume text provided. \
    Do NOT invent employers, dates, degrees or skills that are not in the resume. \
    If the resume does not contain the information, say so.";

/// Upper bound on embedded resume text; longer context is truncated on a char boundary.
pub const MAX_CONTEXT_CHARS: usize = 60_000;

/// Truncates `text` to at most `max_chars` characters.
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
