//! Graph Assembly
//!
//! Turns the seven-stage result bundle into one board-ready analysis, then
//! reconciles that board with the case's actual evidence.

use std::collections::HashSet;

use crimeboard_core::{
    canonical_board_id, evidence_board_id, normalize_suspects, BoardNode, Connection, EvidenceItem, NodeType,
    Position, Suspect,
};

use crate::models::analysis::{BoardAnalysis, OrchestrationResult};
use crate::models::stages::non_blank;

/// Characters of each suspicion reason kept as a suspect node tag.
const REASON_TAG_CHARS: usize = 20;

/// Grid used for suspect nodes added before any layout pass.
const SUSPECT_GRID_X: f64 = 100.0;
const SUSPECT_GRID_STRIDE: f64 = 150.0;
const SUSPECT_GRID_COLUMNS: usize = 4;
const SUSPECT_GRID_Y: f64 = 300.0;

/// Merge the stage outputs into a single analysis.
///
/// Suspects come from the ranking stage when it produced a list, otherwise
/// from the merge stage. Nodes and edges come from the connection map when
/// present, otherwise from the merge stage. Every suspect without a node gets
/// one.
pub fn build_final_output(result: &OrchestrationResult, case_title: &str) -> BoardAnalysis {
    let final_analysis = &result.final_analysis;
    let case_file = &result.case_file;

    let suspects = normalize_suspects(
        result
            .suspects
            .suspects
            .clone()
            .or_else(|| final_analysis.suspects.clone())
            .unwrap_or_default(),
    );

    let mut nodes = result
        .connection_map
        .nodes
        .clone()
        .or_else(|| final_analysis.evidence_nodes.clone())
        .unwrap_or_default();
    let connections = result
        .connection_map
        .edges
        .clone()
        .or_else(|| final_analysis.connections.clone())
        .unwrap_or_default();

    for suspect in &suspects {
        if !nodes.iter().any(|node| node.id == suspect.suspect_id) {
            let node = suspect_node(suspect, nodes.len());
            tracing::debug!("[Assembly] Adding missing suspect node {}", node.id);
            nodes.push(node);
        }
    }

    let prosecutor_notes = non_blank(final_analysis.prosecutor_notes.as_deref())
        .or_else(|| non_blank(case_file.executive_summary.as_deref()))
        .unwrap_or_default()
        .to_string();

    BoardAnalysis {
        case_title: non_blank(final_analysis.case_title.as_deref())
            .unwrap_or(case_title)
            .to_string(),
        master_summary: final_analysis.master_summary.clone().unwrap_or_default(),
        timeline: final_analysis.timeline.clone().unwrap_or_default(),
        suspects,
        evidence_nodes: nodes,
        connections,
        ui: final_analysis.ui.clone().unwrap_or_default(),
        next_step: final_analysis.next_step.clone().unwrap_or_default(),
        prosecutor_notes,
        case_file: case_file.clone(),
    }
}

/// Node for a suspect the agents did not place on the board.
///
/// `existing` is the number of nodes already on the board; it picks the
/// column of a four-wide grid.
pub fn suspect_node(suspect: &Suspect, existing: usize) -> BoardNode {
    let mut node = BoardNode::suspect(suspect.suspect_id.clone(), suspect.board_title());
    node.data.text = Some(
        suspect
            .key_attributes
            .description
            .clone()
            .unwrap_or_default(),
    );
    node.data.tags = suspect
        .why_suspected
        .iter()
        .map(|w| w.reason.chars().take(REASON_TAG_CHARS).collect())
        .collect();
    node.data.guilt_probability = Some(suspect.guilt_probability);
    node.data.suspect_data = Some(suspect.clone());
    node.position = Some(Position::new(
        SUSPECT_GRID_X + (existing % SUSPECT_GRID_COLUMNS) as f64 * SUSPECT_GRID_STRIDE,
        SUSPECT_GRID_Y,
    ));
    node
}

/// Node built straight from an evidence item, bypassing the agents.
pub fn evidence_node(item: &EvidenceItem, index: usize) -> BoardNode {
    let mut node = BoardNode::evidence(
        evidence_board_id(index),
        NodeType::for_evidence(item.kind, &item.filename),
        item.filename.clone(),
    );
    node.data.url = item.url.clone();
    node.data.text = item.text();
    node.data.tags = item.tags.clone();
    node.data.kind = Some(item.kind.as_str().to_string());
    node
}

/// Reconcile an assembled board with the evidence of its case.
///
/// - A board with neither nodes nor suspects gets one node per evidence item.
/// - `EVID-`/`SUS-` ids are upper-cased on nodes and edge endpoints.
/// - Every evidence item's `EVID-NN` id is guaranteed a node.
/// - Repeated node ids collapse to their first occurrence.
/// - Edges whose source or target is not on the board are dropped.
pub fn complete_board(mut analysis: BoardAnalysis, evidence: &[EvidenceItem]) -> BoardAnalysis {
    if analysis.is_empty() && !evidence.is_empty() {
        tracing::warn!(
            "[Assembly] Agent chain produced an empty board, using {} evidence nodes",
            evidence.len()
        );
        analysis.evidence_nodes = evidence
            .iter()
            .enumerate()
            .map(|(index, item)| evidence_node(item, index))
            .collect();
    }

    for node in &mut analysis.evidence_nodes {
        node.id = canonical_board_id(&node.id);
    }
    for edge in &mut analysis.connections {
        edge.source_id = canonical_board_id(&edge.source_id);
        edge.target_id = canonical_board_id(&edge.target_id);
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(analysis.evidence_nodes.len());
    let before = analysis.evidence_nodes.len();
    analysis
        .evidence_nodes
        .retain(|node| seen.insert(node.id.clone()));
    if analysis.evidence_nodes.len() < before {
        tracing::debug!(
            "[Assembly] Collapsed {} duplicate node ids",
            before - analysis.evidence_nodes.len()
        );
    }

    for (index, item) in evidence.iter().enumerate() {
        let board_id = evidence_board_id(index);
        if seen.insert(board_id) {
            let node = evidence_node(item, index);
            tracing::debug!("[Assembly] Adding missing evidence node {}", node.id);
            analysis.evidence_nodes.push(node);
        }
    }

    analysis.connections = drop_dangling_edges(
        std::mem::take(&mut analysis.connections),
        &seen,
    );
    analysis
}

fn drop_dangling_edges(edges: Vec<Connection>, node_ids: &HashSet<String>) -> Vec<Connection> {
    let total = edges.len();
    let kept: Vec<Connection> = edges
        .into_iter()
        .filter(|edge| {
            let keep = node_ids.contains(&edge.source_id) && node_ids.contains(&edge.target_id);
            if !keep {
                tracing::warn!(
                    "[Assembly] Dropping edge {} -> {}: endpoint not on the board",
                    edge.source_id,
                    edge.target_id
                );
            }
            keep
        })
        .collect();
    if kept.len() < total {
        tracing::info!(
            "[Assembly] Kept {} of {} edges after endpoint check",
            kept.len(),
            total
        );
    }
    kept
}
