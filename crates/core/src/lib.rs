//! CrimeBoard Core
//!
//! Foundational domain types and error types for the CrimeBoard workspace.
//! This crate has no dependency on the agent client, the orchestration
//! pipeline, or any storage backend.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `evidence` - Evidence items, evidence kinds, and the `EVID-NN` / `SUS-NN` id conventions
//! - `case` - Cases and the case status machine
//! - `suspect` - Suspects ranked by the agent pipeline
//! - `board` - Board nodes and edges
//! - `lenient` - Tolerant `serde` helpers for agent-produced JSON

pub mod board;
pub mod case;
pub mod error;
pub mod evidence;
pub mod lenient;
pub mod suspect;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Evidence ───────────────────────────────────────────────────────────
pub use evidence::{
    canonical_board_id, evidence_board_id, format_evidence_summary, suspect_board_id, EvidenceItem, EvidenceKind,
    EVIDENCE_ID_PREFIX, SUSPECT_ID_PREFIX,
};

// ── Cases ──────────────────────────────────────────────────────────────
pub use case::{Case, CaseStatus};

// ── Board Graph ────────────────────────────────────────────────────────
pub use board::{
    BoardNode, Connection, NodeData, NodeKind, NodeType, Position, RelationshipKind,
    DEFAULT_EDGE_CONFIDENCE,
};
pub use suspect::{
    normalize_suspects, KeyAttributes, Suspect, SuspectRelationship, SuspicionReason,
    DEFAULT_GUILT_PROBABILITY,
};
