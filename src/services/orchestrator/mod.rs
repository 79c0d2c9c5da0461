//! Orchestrator
//!
//! The seven-stage agent pipeline and the assembly of its outputs into a
//! board.
//!
//! ## Modules
//! - `prompts` - System prompts of the agent roles
//! - `pipeline` - Stage sequencing (`Orchestrator`, `AgentStage`)
//! - `assembly` - Merge of stage outputs into a `BoardAnalysis`

pub mod assembly;
pub mod pipeline;
pub mod prompts;

pub use assembly::{build_final_output, complete_board, evidence_node, suspect_node};
pub use pipeline::{base_context, AgentStage, Orchestrator};
