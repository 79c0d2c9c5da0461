//! Analysis Models
//!
//! The seven-stage result bundle and the board-ready analysis assembled from it.

use crimeboard_core::{BoardNode, Connection, Suspect};
use serde::{Deserialize, Serialize};

use super::stages::{
    BoardUi, CaseFile, ConnectionMap, ForensicTags, MergedAnalysis, PsychoProfile,
    SuspectRanking, TimelineEvent, WitnessAnalysis,
};

/// Outputs of all seven pipeline stages, in stage order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrchestrationResult {
    pub forensic_tags: ForensicTags,
    pub witness_analysis: WitnessAnalysis,
    pub psycho_profile: PsychoProfile,
    pub suspects: SuspectRanking,
    pub connection_map: ConnectionMap,
    pub final_analysis: MergedAnalysis,
    pub case_file: CaseFile,
}

/// The unified, board-ready analysis of a case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardAnalysis {
    pub case_title: String,
    pub master_summary: String,
    pub timeline: Vec<TimelineEvent>,
    pub suspects: Vec<Suspect>,
    pub evidence_nodes: Vec<BoardNode>,
    pub connections: Vec<Connection>,
    pub ui: BoardUi,
    pub next_step: String,
    pub prosecutor_notes: String,
    pub case_file: CaseFile,
}

impl BoardAnalysis {
    /// Number of suspect nodes on the board.
    pub fn suspect_node_count(&self) -> usize {
        self.evidence_nodes.iter().filter(|n| n.is_suspect()).count()
    }

    /// Whether the board has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.evidence_nodes.is_empty() && self.suspects.is_empty()
    }
}
