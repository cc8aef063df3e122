//! Upload validation: content type and size checks before any decoding happens.

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOC_MIME: &str = "application/msword";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Doc,
    Docx,
}

impl UploadKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Strip parameters such as `; charset=binary`.
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Some(UploadKind::Pdf),
            DOC_MIME => Some(UploadKind::Doc),
            DOCX_MIME => Some(UploadKind::Docx),
            _ => None,
        }
    }

    /// Used when the client sends `application/octet-stream` or nothing at all.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(UploadKind::Pdf),
            "doc" => Some(UploadKind::Doc),
            "docx" => Some(UploadKind::Docx),
            _ => None,
        }
    }
}

/// Checks an uploaded file. Word documents are accepted types but cannot be
/// extracted, so they fail with 422 rather than 400.
pub fn validate_upload(
    content_type: Option<&str>,
    file_name: &str,
    len: usize,
    max_bytes: usize,
) -> Result<UploadKind, AppError> {
    let kind = content_type
        .and_then(UploadKind::from_mime)
        .or_else(|| UploadKind::from_file_name(file_name))
        .ok_or_else(|| {
            AppError::Validation("Only PDF or DOC/DOCX files are allowed.".to_string())
        })?;

    if len == 0 {
        return Err(AppError::Validation("Uploaded file is empty.".to_string()));
    }
    if len > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size must be {} or smaller.",
            human_size(max_bytes)
        )));
    }
    if kind != UploadKind::Pdf {
        return Err(AppError::UnprocessableEntity(
            "Text extraction is only supported for PDF files.".to_string(),
        ));
    }
    Ok(kind)
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
