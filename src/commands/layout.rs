//! Layout Command
//!
//! Lays out a board read from JSON.

use std::path::Path;

use crimeboard_core::{BoardNode, EvidenceItem};
use serde::Deserialize;

use crate::services::layout::{assign_layout, needs_layout, place_unpositioned};
use crate::utils::error::AppResult;

/// Either a bare node array or nodes with the evidence they refer to.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LayoutInput {
    Nodes(Vec<BoardNode>),
    Board {
        nodes: Vec<BoardNode>,
        #[serde(default)]
        evidence: Vec<EvidenceItem>,
    },
}

impl LayoutInput {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Lay out the nodes when they need it, or always with `force`.
pub fn layout_nodes(input: LayoutInput, force: bool) -> Vec<BoardNode> {
    let (nodes, evidence) = match input {
        LayoutInput::Nodes(nodes) => (nodes, Vec::new()),
        LayoutInput::Board { nodes, evidence } => (nodes, evidence),
    };

    if force || needs_layout(&nodes) {
        tracing::info!("[Layout] Laying out {} nodes", nodes.len());
        assign_layout(nodes, &evidence)
    } else {
        tracing::info!("[Layout] Positions already spread out, keeping them");
        place_unpositioned(nodes, &evidence)
    }
}
