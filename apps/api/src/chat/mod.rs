// Resume-aware chat and job matching.
// Both flatten the Document Record with `format_for_ai` and hand it to the LLM client.

pub mod handlers;
pub mod matching;
pub mod prompts;
