//! Analyze Command
//!
//! Runs a full case analysis from a JSON case file against an in-memory
//! board store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crimeboard_llm::AgentClient;
use serde::{Deserialize, Serialize};

use crate::models::analysis::BoardAnalysis;
use crate::services::analysis::{CaseAnalysisService, RegisterEvidence};
use crate::services::ocr::extract_text;
use crate::storage::board_store::InMemoryBoardStore;
use crate::utils::error::AppResult;

/// One evidence entry of a case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEvidence {
    #[serde(flatten)]
    pub upload: RegisterEvidence,
    /// Local copy of the file; its text is extracted when `extracted_text` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl From<RegisterEvidence> for CaseEvidence {
    fn from(upload: RegisterEvidence) -> Self {
        Self { upload, path: None }
    }
}

impl CaseEvidence {
    /// The upload, with text extracted from `path` when the entry carries none.
    pub fn into_upload(self) -> AppResult<RegisterEvidence> {
        let mut upload = self.upload;
        let Some(path) = self.path.filter(|_| upload.extracted_text.is_none()) else {
            return Ok(upload);
        };
        let bytes = std::fs::read(&path)?;
        let extracted = extract_text(&upload.filename, upload.mime_type.as_deref(), &bytes);
        if !extracted.is_empty() {
            tracing::debug!("[CLI] Extracted text for {} from {}", upload.filename, path.display());
            upload.extracted_text = Some(serde_json::to_value(&extracted)?);
        }
        Ok(upload)
    }
}

/// A case as described in a case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseInput {
    pub title: String,
    #[serde(default)]
    pub evidence: Vec<CaseEvidence>,
}

impl CaseInput {
    /// Read a case file. Relative evidence paths resolve against its directory.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut input: CaseInput = serde_json::from_str(&content)?;
        if let Some(base) = path.parent() {
            for entry in &mut input.evidence {
                if let Some(evidence_path) = entry.path.as_mut().filter(|p| p.is_relative()) {
                    *evidence_path = base.join(&*evidence_path);
                }
            }
        }
        Ok(input)
    }
}

/// Register the case and its evidence, then analyze it.
pub async fn analyze_case_input(
    input: CaseInput,
    client: Arc<dyn AgentClient>,
) -> AppResult<BoardAnalysis> {
    let service = CaseAnalysisService::new(Arc::new(InMemoryBoardStore::new()), client);

    let case = service.create_case(&input.title).await?;
    for entry in input.evidence {
        service.register_evidence(&case.id, entry.into_upload()?).await?;
    }

    service.analyze_case(&case.id).await
}
