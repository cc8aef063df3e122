// PDF layout reconstruction for resumes.
// Glyph runs → lines → page text + table/section regions → DocumentRecord,
// then independent read-only views (AI context, sections, statistics, search).
// Everything here is synchronous and CPU-bound; callers run it on the blocking pool.

pub mod error;
pub mod formatter;
pub mod lines;
pub mod models;
pub mod page;
pub mod patterns;
pub mod pipeline;
pub mod search;
pub mod sections;
pub mod statistics;
pub mod structurer;
pub mod tables;

pub use error::ExtractError;
pub use formatter::format_for_ai;
pub use models::DocumentRecord;
pub use pipeline::{extract_document, ExtractMode, ExtractOptions};
pub use search::search_keywords;
pub use sections::classify_sections;
pub use statistics::compute_statistics;
