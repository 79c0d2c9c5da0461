//! Case Analysis Service
//!
//! Connects the agent pipeline to the board store: registers cases and
//! evidence, runs an analysis, and persists the resulting board while
//! driving the case status machine.

use std::sync::Arc;

use chrono::Utc;
use crimeboard_core::{format_evidence_summary, Case, CaseStatus, EvidenceItem, EvidenceKind};
use crimeboard_llm::AgentClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::analysis::BoardAnalysis;
use crate::services::layout::{assign_layout, needs_layout, place_unpositioned};
use crate::services::orchestrator::{build_final_output, complete_board, Orchestrator};
use crate::services::tagging::generate_tags;
use crate::storage::board_store::{BoardStore, StoredBoard};
use crate::utils::error::{AppError, AppResult};

/// An uploaded file to register against a case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterEvidence {
    pub filename: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Explicit kind; inferred from the MIME type and filename when absent
    #[serde(default)]
    pub kind: Option<EvidenceKind>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RegisterEvidence {
    pub fn new(filename: impl Into<String>, mime_type: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.map(str::to_string),
            ..Self::default()
        }
    }
}

/// Case lifecycle and analysis on top of a [`BoardStore`].
pub struct CaseAnalysisService {
    store: Arc<dyn BoardStore>,
    orchestrator: Orchestrator,
}

impl CaseAnalysisService {
    pub fn new(store: Arc<dyn BoardStore>, client: Arc<dyn AgentClient>) -> Self {
        Self {
            store,
            orchestrator: Orchestrator::new(client),
        }
    }

    /// Create an open case with a fresh id.
    pub async fn create_case(&self, title: &str) -> AppResult<Case> {
        let case = Case::new(uuid::Uuid::new_v4().to_string(), title)?;
        self.store.insert_case(case.clone()).await?;
        tracing::info!("[Cases] Created case {} ({})", case.id, case.title);
        Ok(case)
    }

    pub async fn get_case(&self, case_id: &str) -> AppResult<Case> {
        self.store
            .get_case(case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_id)))
    }

    /// Register one evidence item.
    ///
    /// Photos also receive the simulated filename tags.
    pub async fn register_evidence(
        &self,
        case_id: &str,
        upload: RegisterEvidence,
    ) -> AppResult<EvidenceItem> {
        let filename = upload.filename.trim();
        if filename.is_empty() {
            return Err(AppError::validation("Evidence filename is required"));
        }
        // Fail with NotFound before generating anything
        self.get_case(case_id).await?;

        let kind = upload
            .kind
            .unwrap_or_else(|| EvidenceKind::infer(upload.mime_type.as_deref(), filename));

        let mut item = EvidenceItem::new(uuid::Uuid::new_v4().to_string(), kind, filename);
        item.url = upload.url;
        item.extracted_text = upload.extracted_text;
        item.tags = upload.tags;

        if kind == EvidenceKind::Photo {
            let image_tags = generate_tags(filename, Utc::now().date_naive());
            for tag in image_tags.tags {
                if !item.tags.contains(&tag) {
                    item.tags.push(tag);
                }
            }
        }

        self.store.insert_evidence(case_id, item.clone()).await?;
        tracing::info!(
            "[Cases] Registered {} evidence {} on case {}",
            item.kind,
            item.filename,
            case_id
        );
        Ok(item)
    }

    pub async fn list_evidence(&self, case_id: &str) -> AppResult<Vec<EvidenceItem>> {
        self.store.list_evidence(case_id).await
    }

    pub async fn board(&self, case_id: &str) -> AppResult<StoredBoard> {
        self.store.board(case_id).await
    }

    /// Analyze a case and replace its board.
    ///
    /// A case without evidence is rejected before any agent is called and
    /// keeps its status. Agent failures only thin out the board; a store
    /// failure after the case entered `analyzing` moves it to `error` and is
    /// returned.
    pub async fn analyze_case(&self, case_id: &str) -> AppResult<BoardAnalysis> {
        let case = self.get_case(case_id).await?;
        let evidence = self.store.list_evidence(case_id).await?;
        if evidence.is_empty() {
            return Err(AppError::validation("No evidence to analyze"));
        }

        self.store
            .update_case_status(case_id, CaseStatus::Analyzing)
            .await?;

        match self.run_analysis(&case, &evidence).await {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                tracing::error!("[Cases] Analysis of case {} failed: {}", case_id, e);
                if let Err(status_err) = self
                    .store
                    .update_case_status(case_id, CaseStatus::Error)
                    .await
                {
                    tracing::warn!(
                        "[Cases] Could not mark case {} as errored: {}",
                        case_id,
                        status_err
                    );
                }
                Err(e)
            }
        }
    }

    async fn run_analysis(
        &self,
        case: &Case,
        evidence: &[EvidenceItem],
    ) -> AppResult<BoardAnalysis> {
        let summary = format_evidence_summary(evidence);
        let result = self.orchestrator.run(&case.title, &case.id, &summary).await;

        let mut analysis = complete_board(build_final_output(&result, &case.title), evidence);
        if needs_layout(&analysis.evidence_nodes) {
            tracing::info!(
                "[Cases] Applying lane layout to {} nodes",
                analysis.evidence_nodes.len()
            );
            let nodes = std::mem::take(&mut analysis.evidence_nodes);
            analysis.evidence_nodes = assign_layout(nodes, evidence);
        } else {
            let nodes = std::mem::take(&mut analysis.evidence_nodes);
            analysis.evidence_nodes = place_unpositioned(nodes, evidence);
        }

        self.store
            .replace_board(
                &case.id,
                analysis.evidence_nodes.clone(),
                analysis.connections.clone(),
            )
            .await?;
        self.store
            .save_analysis(&case.id, serde_json::to_value(&analysis)?)
            .await?;
        self.store
            .update_case_status(&case.id, CaseStatus::Analyzed)
            .await?;

        tracing::info!(
            "[Cases] Case {} analyzed: {} nodes ({} suspects), {} edges",
            case.id,
            analysis.evidence_nodes.len(),
            analysis.suspect_node_count(),
            analysis.connections.len()
        );
        Ok(analysis)
    }
}
