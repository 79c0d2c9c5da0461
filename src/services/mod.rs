//! Services
//!
//! Business logic services for the application.

pub mod analysis;
pub mod composite;
pub mod layout;
pub mod ocr;
pub mod orchestrator;
pub mod tagging;

pub use analysis::{CaseAnalysisService, RegisterEvidence};
pub use composite::{build_composite_prompt, extract_features, CompositeSketch};
pub use layout::{
    assign_layout, classify_node, lane_label, needs_layout, place_unpositioned, Lane,
};
pub use ocr::{entity_hints, extract_text, EntityHint, EntityKind, ExtractedText};
pub use orchestrator::{build_final_output, complete_board, AgentStage, Orchestrator};
pub use tagging::{generate_tags, ImageTags};
