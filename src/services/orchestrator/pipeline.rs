//! Multi-Agent Pipeline
//!
//! Runs the seven agent stages in a fixed order. Each stage sees the case
//! context plus the typed outputs of the stages it depends on. A stage whose
//! call or parse fails contributes its default record and the run continues;
//! there is no skip and no early exit.

use std::sync::Arc;

use crimeboard_llm::{parse_agent_json, AgentClient};
use serde::Serialize;

use super::prompts::{
    CASE_FILE_WRITER_PROMPT, CONNECTION_MAPPER_PROMPT, DESK_SERGEANT_PROMPT,
    FORENSIC_TAGGER_PROMPT, PSYCHO_PROFILER_PROMPT, SUSPECT_RANKER_PROMPT,
    WITNESS_ANALYST_PROMPT,
};
use crate::models::analysis::OrchestrationResult;
use crate::models::stages::{
    CaseFile, ConnectionMap, ForensicTags, MergedAnalysis, PsychoProfile, StageOutput,
    SuspectRanking, WitnessAnalysis,
};

/// One agent role in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentStage {
    ForensicTagger,
    WitnessAnalyst,
    PsychoProfiler,
    SuspectRanker,
    ConnectionMapper,
    DeskSergeant,
    CaseFileWriter,
}

impl AgentStage {
    /// All stages in execution order.
    pub const ALL: [AgentStage; 7] = [
        AgentStage::ForensicTagger,
        AgentStage::WitnessAnalyst,
        AgentStage::PsychoProfiler,
        AgentStage::SuspectRanker,
        AgentStage::ConnectionMapper,
        AgentStage::DeskSergeant,
        AgentStage::CaseFileWriter,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AgentStage::ForensicTagger => "ForensicTagger",
            AgentStage::WitnessAnalyst => "WitnessAnalyst",
            AgentStage::PsychoProfiler => "PsychoProfiler",
            AgentStage::SuspectRanker => "SuspectRanker",
            AgentStage::ConnectionMapper => "ConnectionMapper",
            AgentStage::DeskSergeant => "DeskSergeant",
            AgentStage::CaseFileWriter => "CaseFileWriter",
        }
    }

    /// 1-based position in the pipeline.
    pub fn step(&self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| stage == self)
            .map_or(0, |index| index + 1)
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            AgentStage::ForensicTagger => FORENSIC_TAGGER_PROMPT,
            AgentStage::WitnessAnalyst => WITNESS_ANALYST_PROMPT,
            AgentStage::PsychoProfiler => PSYCHO_PROFILER_PROMPT,
            AgentStage::SuspectRanker => SUSPECT_RANKER_PROMPT,
            AgentStage::ConnectionMapper => CONNECTION_MAPPER_PROMPT,
            AgentStage::DeskSergeant => DESK_SERGEANT_PROMPT,
            AgentStage::CaseFileWriter => CASE_FILE_WRITER_PROMPT,
        }
    }

    /// The stage a system prompt belongs to.
    pub fn from_system_prompt(prompt: &str) -> Option<AgentStage> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.system_prompt() == prompt)
    }
}

impl std::fmt::Display for AgentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Shared case context handed to every stage.
pub fn base_context(case_title: &str, case_id: &str, evidence_summary: &str) -> String {
    format!(
        "CASE TITLE: {}\nCASE ID: {}\n\nEVIDENCE ITEMS:\n{}",
        case_title, case_id, evidence_summary
    )
}

fn section<T: Serialize>(label: &str, value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    format!("\n\n{}:\n{}", label, json)
}

/// Drives the seven-stage analysis. Holds no per-run state, so one
/// orchestrator can serve concurrent runs for different cases.
#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn AgentClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn AgentClient>) -> Self {
        Self { client }
    }

    /// Run every stage in order and return their outputs. Never fails.
    pub async fn run(
        &self,
        case_title: &str,
        case_id: &str,
        evidence_summary: &str,
    ) -> OrchestrationResult {
        tracing::info!(
            "[Orchestration] Starting multi-agent analysis for case {} via {}",
            case_id,
            self.client.name()
        );
        let base = base_context(case_title, case_id, evidence_summary);

        let forensic_tags: ForensicTags = self
            .run_stage(AgentStage::ForensicTagger, base.clone())
            .await;

        let witness_analysis: WitnessAnalysis = self
            .run_stage(
                AgentStage::WitnessAnalyst,
                format!("{}{}", base, section("FORENSIC TAGS", &forensic_tags)),
            )
            .await;

        let psycho_profile: PsychoProfile = self
            .run_stage(
                AgentStage::PsychoProfiler,
                format!("{}{}", base, section("WITNESS ANALYSIS", &witness_analysis)),
            )
            .await;

        let analyses = format!(
            "{}{}{}",
            section("FORENSIC TAGS", &forensic_tags),
            section("WITNESS ANALYSIS", &witness_analysis),
            section("BEHAVIORAL PROFILE", &psycho_profile),
        );

        let suspects: SuspectRanking = self
            .run_stage(AgentStage::SuspectRanker, format!("{}{}", base, analyses))
            .await;

        let connection_map: ConnectionMap = self
            .run_stage(
                AgentStage::ConnectionMapper,
                format!("{}{}", base, section("SUSPECTS", &suspects)),
            )
            .await;

        let final_analysis: MergedAnalysis = self
            .run_stage(
                AgentStage::DeskSergeant,
                format!(
                    "{}{}{}{}",
                    base,
                    analyses,
                    section("SUSPECTS", &suspects),
                    section("CONNECTION MAP", &connection_map)
                ),
            )
            .await;

        let case_file: CaseFile = self
            .run_stage(
                AgentStage::CaseFileWriter,
                format!("{}{}", base, section("FINAL ANALYSIS", &final_analysis)),
            )
            .await;

        tracing::info!("[Orchestration] Complete for case {}", case_id);

        OrchestrationResult {
            forensic_tags,
            witness_analysis,
            psycho_profile,
            suspects,
            connection_map,
            final_analysis,
            case_file,
        }
    }

    async fn run_stage<T: StageOutput>(&self, stage: AgentStage, user_prompt: String) -> T {
        tracing::info!("[Orchestration] Step {}: {}", stage.step(), stage);
        tracing::debug!(
            "[Orchestration] {} prompt is {} chars",
            stage,
            user_prompt.len()
        );

        let raw = self.client.call(stage.system_prompt(), &user_prompt).await;
        let parsed = parse_agent_json(&raw);
        if parsed.is_empty() {
            tracing::warn!("[Orchestration] {} produced no usable output", stage);
        }
        T::from_agent_json(parsed)
    }
}
