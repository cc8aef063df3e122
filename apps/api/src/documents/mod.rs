// Document extraction endpoints.
// Upload validation lives in upload.rs; handlers offload the extraction pipeline
// to the blocking pool and attach the derived views to the response.

pub mod handlers;
pub mod upload;
