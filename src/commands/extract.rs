//! Extract Command

use std::path::Path;

use serde::Serialize;

use crate::services::ocr::{extract_text, ExtractedText};
use crate::utils::error::AppResult;

/// Extracted text of one local file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtractedFile {
    pub filename: String,
    #[serde(flatten)]
    pub extracted: ExtractedText,
}

/// Extract text from a local file; the type comes from `content_type` or the file extension.
pub fn extract_file(path: &Path, content_type: Option<&str>) -> AppResult<ExtractedFile> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let extracted = extract_text(&filename, content_type, &bytes);
    Ok(ExtractedFile { filename, extracted })
}
