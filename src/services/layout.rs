//! Board Layout
//!
//! Deterministic lane layout used when the agents did not supply usable node
//! positions. Evidence nodes are stacked in three vertical lanes (scene,
//! witness, other); suspects sit in one centred row below every evidence node.
//!
//! Collision handling perturbs a candidate position with a small jitter derived
//! from a SHA-256 hash of the node id and the attempt number, so the same input
//! always produces the same board.

use std::collections::HashSet;

use crimeboard_core::{
    evidence_board_id, BoardNode, EvidenceItem, EvidenceKind, NodeType, Position,
};
use sha2::{Digest, Sha256};

const VERTICAL_SPACING: f64 = 220.0;
const HORIZONTAL_SPACING: f64 = 360.0;
const EVIDENCE_START_Y: f64 = 80.0;
const SUSPECT_ROW_MIN_Y: f64 = 500.0;
const BOARD_WIDTH: f64 = 1100.0;
const SUSPECT_ROW_MIN_X: f64 = 100.0;

/// Two positions collide when both axes are closer than this share of the stride.
const OVERLAP_FACTOR: f64 = 0.8;

const EVIDENCE_RETRIES: u32 = 10;
const EVIDENCE_JITTER_X: f64 = 25.0;
const EVIDENCE_NUDGE_Y: f64 = 20.0;
const SUSPECT_RETRIES: u32 = 5;
const SUSPECT_JITTER_X: f64 = 15.0;

const SCENE_KEYWORDS: &[&str] = &[
    "scene",
    "photo",
    "image",
    "crime",
    "forensic",
    "blood",
    "weapon",
    "fingerprint",
    "dna",
    "ballistic",
];

const WITNESS_KEYWORDS: &[&str] = &[
    "witness",
    "statement",
    "interview",
    "testimony",
    "account",
    "report",
    "deposition",
];

/// Semantic grouping of a node on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Scene,
    Witness,
    Suspect,
    Other,
}

impl Lane {
    /// Evidence lanes in the order they are laid out.
    const EVIDENCE: [Lane; 3] = [Lane::Scene, Lane::Witness, Lane::Other];

    /// Horizontal origin of the lane. Suspects are centred in a row instead.
    pub fn x(&self) -> f64 {
        match self {
            Lane::Scene => 100.0,
            Lane::Witness | Lane::Suspect => 450.0,
            Lane::Other => 800.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lane::Scene => "Scene Evidence",
            Lane::Witness => "Witnesses",
            Lane::Suspect => "Suspects",
            Lane::Other => "Other Evidence",
        }
    }
}

/// The evidence item a node refers to, if any.
///
/// A node is linked by its `EVID-NN` id, by containing the item's storage id,
/// or by its title and the item's filename containing one another.
fn linked_evidence<'a>(
    node: &BoardNode,
    evidence: &'a [EvidenceItem],
) -> Option<&'a EvidenceItem> {
    let title = node.title.trim();
    evidence.iter().enumerate().find_map(|(index, item)| {
        let by_board_id = node.id == evidence_board_id(index);
        let by_storage_id = !item.id.is_empty() && node.id.contains(&item.id);
        let by_filename = !title.is_empty()
            && !item.filename.is_empty()
            && (title.contains(&item.filename) || item.filename.contains(title));
        (by_board_id || by_storage_id || by_filename).then_some(item)
    })
}

/// Classify a node into its lane.
pub fn classify_node(node: &BoardNode, evidence: &[EvidenceItem]) -> Lane {
    if node.is_suspect() {
        return Lane::Suspect;
    }

    let linked = linked_evidence(node, evidence);
    let evidence_kind = linked.map(|item| item.kind);

    let haystack = [
        node.node_type.as_str().to_string(),
        node.title.clone(),
        node.data.kind.clone().unwrap_or_default(),
        linked.map(|item| item.filename.clone()).unwrap_or_default(),
        evidence_kind.map(|k| k.as_str().to_string()).unwrap_or_default(),
        node.data.tags.join(" "),
    ]
    .join(" ")
    .to_lowercase();

    let mentions = |keywords: &[&str]| keywords.iter().any(|kw| haystack.contains(kw));

    if node.node_type == NodeType::Photo
        || evidence_kind == Some(EvidenceKind::Photo)
        || mentions(SCENE_KEYWORDS)
    {
        return Lane::Scene;
    }

    if matches!(node.node_type, NodeType::Statement | NodeType::Text)
        || evidence_kind == Some(EvidenceKind::Statement)
        || mentions(WITNESS_KEYWORDS)
    {
        return Lane::Witness;
    }

    Lane::Other
}

/// Display label of the lane a node falls in.
pub fn lane_label(node: &BoardNode, evidence: &[EvidenceItem]) -> &'static str {
    classify_node(node, evidence).label()
}

/// Whether the nodes need a layout pass.
///
/// True when fewer than half the nodes have a non-origin position, or when the
/// distinct positions among those are fewer than 70% of them.
pub fn needs_layout(nodes: &[BoardNode]) -> bool {
    if nodes.is_empty() {
        return false;
    }

    let placed: Vec<Position> = nodes
        .iter()
        .filter_map(|node| node.position)
        .filter(|position| !position.is_origin())
        .collect();

    if (placed.len() as f64) < nodes.len() as f64 / 2.0 {
        return true;
    }

    let distinct: HashSet<(i64, i64)> = placed.iter().map(Position::pixel_key).collect();
    (distinct.len() as f64) < placed.len() as f64 * 0.7
}

/// Deterministic offset in `[-amplitude, amplitude)` for a node and attempt.
pub fn jitter(node_id: &str, attempt: u32, amplitude: f64) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(node_id.as_bytes());
    hasher.update(attempt.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let unit = (u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64;
    (unit - 0.5) * 2.0 * amplitude
}

fn overlaps(placed: &[Position], x: f64, y: f64) -> bool {
    placed.iter().any(|p| {
        (p.x - x).abs() < HORIZONTAL_SPACING * OVERLAP_FACTOR
            && (p.y - y).abs() < VERTICAL_SPACING * OVERLAP_FACTOR
    })
}

/// Assign a position to every node.
///
/// The output has the same nodes in the same order; only `position` changes.
pub fn assign_layout(mut nodes: Vec<BoardNode>, evidence: &[EvidenceItem]) -> Vec<BoardNode> {
    if nodes.is_empty() {
        return nodes;
    }

    let lanes: Vec<Lane> = nodes.iter().map(|node| classify_node(node, evidence)).collect();
    let mut placed: Vec<Position> = Vec::with_capacity(nodes.len());

    for lane in Lane::EVIDENCE {
        let members = (0..nodes.len()).filter(|&i| lanes[i] == lane);
        for (slot, index) in members.enumerate() {
            let node = &mut nodes[index];
            let mut x = lane.x();
            let mut y = EVIDENCE_START_Y + slot as f64 * VERTICAL_SPACING;

            let mut attempt = 0;
            while attempt < EVIDENCE_RETRIES && overlaps(&placed, x, y) {
                x += jitter(&node.id, attempt, EVIDENCE_JITTER_X);
                y += EVIDENCE_NUDGE_Y;
                attempt += 1;
            }

            let position = Position::new(x.round(), y.round());
            placed.push(position);
            node.position = Some(position);
        }
    }

    let suspects: Vec<usize> = (0..nodes.len())
        .filter(|&i| lanes[i] == Lane::Suspect)
        .collect();
    if !suspects.is_empty() {
        let lowest_evidence = placed.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let row_y = SUSPECT_ROW_MIN_Y.max(lowest_evidence + VERTICAL_SPACING);
        let total_width = (suspects.len() - 1) as f64 * HORIZONTAL_SPACING;
        let start_x = SUSPECT_ROW_MIN_X.max((BOARD_WIDTH - total_width) / 2.0);

        for (slot, index) in suspects.into_iter().enumerate() {
            let node = &mut nodes[index];
            let mut x = start_x + slot as f64 * HORIZONTAL_SPACING;

            let mut attempt = 0;
            while attempt < SUSPECT_RETRIES && overlaps(&placed, x, row_y) {
                x += jitter(&node.id, attempt, SUSPECT_JITTER_X);
                attempt += 1;
            }

            let position = Position::new(x.round(), row_y.round());
            placed.push(position);
            node.position = Some(position);
        }
    }

    tracing::debug!("[Layout] Assigned positions to {} nodes", nodes.len());
    nodes
}

/// Give a position to every node that has none, keeping all existing positions.
///
/// Evidence nodes take the first slot of their lane that does not overlap an
/// occupied position. Suspects take the first free slot of a row below the
/// lowest evidence node.
pub fn place_unpositioned(mut nodes: Vec<BoardNode>, evidence: &[EvidenceItem]) -> Vec<BoardNode> {
    let missing: Vec<usize> = (0..nodes.len())
        .filter(|&i| nodes[i].position.is_none())
        .collect();
    if missing.is_empty() {
        return nodes;
    }

    let mut placed: Vec<Position> = nodes.iter().filter_map(|node| node.position).collect();
    let lanes: Vec<Lane> = missing
        .iter()
        .map(|&i| classify_node(&nodes[i], evidence))
        .collect();

    for (&index, lane) in missing.iter().zip(&lanes) {
        if *lane == Lane::Suspect {
            continue;
        }
        let position = (0u32..)
            .map(|slot| Position::new(lane.x(), EVIDENCE_START_Y + slot as f64 * VERTICAL_SPACING))
            .find(|p| !overlaps(&placed, p.x, p.y))
            .unwrap_or_else(|| Position::new(lane.x(), EVIDENCE_START_Y));
        placed.push(position);
        nodes[index].position = Some(position);
    }

    let lowest_evidence = nodes
        .iter()
        .filter(|node| !node.is_suspect())
        .filter_map(|node| node.position)
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let row_y = SUSPECT_ROW_MIN_Y.max(lowest_evidence + VERTICAL_SPACING);
    for (&index, lane) in missing.iter().zip(&lanes) {
        if *lane != Lane::Suspect {
            continue;
        }
        let position = (0u32..)
            .map(|slot| Position::new(SUSPECT_ROW_MIN_X + slot as f64 * HORIZONTAL_SPACING, row_y))
            .find(|p| !overlaps(&placed, p.x, p.y))
            .unwrap_or_else(|| Position::new(SUSPECT_ROW_MIN_X, row_y));
        placed.push(position);
        nodes[index].position = Some(position);
    }

    tracing::debug!("[Layout] Placed {} unpositioned nodes", missing.len());
    nodes
}
