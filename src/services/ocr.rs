//! Evidence Text Extraction
//!
//! Reads text out of uploaded evidence. Plain-text files are decoded and
//! scanned for date and time hints; images and PDFs get a placeholder until a
//! real OCR backend is wired in.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const IMAGE_PLACEHOLDER: &str = "[Image requires OCR processing - placeholder for demo]";
pub const PDF_PLACEHOLDER: &str = "[PDF requires OCR/parsing - placeholder for demo]";

const DATE_PATTERN: &str = r"\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{2}-\d{2}";
const TIME_PATTERN: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?:AM|PM|am|pm))?";

fn date_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_PATTERN).ok()).as_ref()
}

fn time_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIME_PATTERN).ok()).as_ref()
}

/// Category of an entity hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Date,
    Time,
    Note,
}

/// A value worth the agents' attention, found while extracting text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHint {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
}

impl EntityHint {
    fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Extraction output, stored as an evidence item's `extracted_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub pages: u32,
    pub entities_hint: Vec<EntityHint>,
}

impl ExtractedText {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Every date, then every time, in order of appearance.
pub fn entity_hints(text: &str) -> Vec<EntityHint> {
    let dates = date_regex()
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| EntityHint::new(EntityKind::Date, m.as_str()));
    let times = time_regex()
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| EntityHint::new(EntityKind::Time, m.as_str()));
    dates.chain(times).collect()
}

/// Extract text from a file's bytes, routed by content type and filename.
///
/// Unknown types yield empty text and no hints.
pub fn extract_text(filename: &str, content_type: Option<&str>, bytes: &[u8]) -> ExtractedText {
    let content_type = content_type.unwrap_or("").to_lowercase();
    let lower_name = filename.to_lowercase();

    let (text, entities_hint) = if content_type.contains("text/") || lower_name.ends_with(".txt") {
        let text = String::from_utf8_lossy(bytes).into_owned();
        let hints = entity_hints(&text);
        (text, hints)
    } else if content_type.contains("image/") {
        (
            IMAGE_PLACEHOLDER.to_string(),
            vec![EntityHint::new(
                EntityKind::Note,
                "Visual evidence - see image tags",
            )],
        )
    } else if content_type.contains("pdf") || lower_name.ends_with(".pdf") {
        (
            PDF_PLACEHOLDER.to_string(),
            vec![EntityHint::new(EntityKind::Note, "Document evidence")],
        )
    } else {
        (String::new(), Vec::new())
    };

    tracing::debug!(
        "[Extract] {} -> {} chars, {} hints",
        filename,
        text.len(),
        entities_hint.len()
    );

    ExtractedText {
        text,
        pages: 1,
        entities_hint,
    }
}
