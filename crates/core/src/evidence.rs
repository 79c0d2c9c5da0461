//! Evidence Items and Board Id Conventions
//!
//! An evidence item is one uploaded file registered against a case. Board ids
//! (`EVID-NN`, `SUS-NN`) are positional labels used inside agent prompts and
//! on the board; they are not storage keys.

use serde::{Deserialize, Serialize};

/// Prefix of evidence board ids.
pub const EVIDENCE_ID_PREFIX: &str = "EVID-";

/// Prefix of suspect board ids.
pub const SUSPECT_ID_PREFIX: &str = "SUS-";

/// Board id of the evidence item at `index` (0-based): `EVID-01`, `EVID-02`, ...
pub fn evidence_board_id(index: usize) -> String {
    format!("{}{:02}", EVIDENCE_ID_PREFIX, index + 1)
}

/// Board id of the suspect at `index` (0-based): `SUS-01`, `SUS-02`, ...
pub fn suspect_board_id(index: usize) -> String {
    format!("{}{:02}", SUSPECT_ID_PREFIX, index + 1)
}

/// Trim an agent-supplied id; `evid-01` and `sus-2` style labels are upper-cased
/// so they compare equal to the generated `EVID-`/`SUS-` ids.
pub fn canonical_board_id(id: &str) -> String {
    let id = id.trim();
    let upper = id.to_uppercase();
    if upper.starts_with(EVIDENCE_ID_PREFIX) || upper.starts_with(SUSPECT_ID_PREFIX) {
        upper
    } else {
        id.to_string()
    }
}

/// Kind of uploaded evidence.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Document,
    Statement,
    #[default]
    Other,
}

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Photo => "photo",
            EvidenceKind::Document => "document",
            EvidenceKind::Statement => "statement",
            EvidenceKind::Other => "other",
        }
    }

    /// Parse a kind label. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "photo" | "image" => EvidenceKind::Photo,
            "document" | "pdf" => EvidenceKind::Document,
            "statement" | "text" => EvidenceKind::Statement,
            _ => EvidenceKind::Other,
        }
    }

    /// Infer the kind of an upload from its MIME type and filename.
    ///
    /// `image/*` is a photo, plain text is a statement, everything else is a document.
    pub fn infer(mime_type: Option<&str>, filename: &str) -> Self {
        let mime = mime_type.unwrap_or("").to_lowercase();
        if mime.starts_with("image/") {
            EvidenceKind::Photo
        } else if mime == "text/plain" || filename.to_lowercase().ends_with(".txt") {
            EvidenceKind::Statement
        } else {
            EvidenceKind::Document
        }
    }
}

impl<'de> Deserialize<'de> for EvidenceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(EvidenceKind::from_label(&label))
    }
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered piece of case evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceItem {
    /// Storage id (opaque, usually a UUID)
    pub id: String,
    pub kind: EvidenceKind,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Extracted text as produced by the extraction service (free-form JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EvidenceItem {
    pub fn new(id: impl Into<String>, kind: EvidenceKind, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            filename: filename.into(),
            url: None,
            extracted_text: None,
            tags: Vec::new(),
        }
    }

    /// Extracted text flattened to a plain string, if any.
    pub fn text(&self) -> Option<String> {
        match self.extracted_text.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// One line of the evidence summary handed to the agent pipeline.
    pub fn summary_line(&self, index: usize) -> String {
        let mut line = format!(
            "{}: {} - \"{}\"",
            evidence_board_id(index),
            self.kind,
            self.filename
        );
        if let Some(text) = self.extracted_text.as_ref().filter(|t| !t.is_null()) {
            line.push_str(&format!(" - Text: {}", text));
        }
        if !self.tags.is_empty() {
            let tags = serde_json::to_string(&self.tags).unwrap_or_default();
            line.push_str(&format!(" - Tags: {}", tags));
        }
        line
    }
}

/// Format the newline-delimited evidence summary for a case.
pub fn format_evidence_summary(evidence: &[EvidenceItem]) -> String {
    evidence
        .iter()
        .enumerate()
        .map(|(index, item)| item.summary_line(index))
        .collect::<Vec<_>>()
        .join("\n")
}
