//! Composite Command
//!
//! Composite sketch prompts from a free-text description or from a suspect
//! in a saved board analysis.

use std::path::Path;

use crimeboard_core::canonical_board_id;

use crate::models::analysis::BoardAnalysis;
use crate::services::composite::{build_composite_prompt, CompositeSketch};
use crate::utils::error::{AppError, AppResult};

/// Read a board analysis written by `analyze --output`.
pub fn load_analysis(path: &Path) -> AppResult<BoardAnalysis> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Composite prompt for one suspect of an analysis, from its description attribute.
pub fn composite_for_suspect(
    analysis: &BoardAnalysis,
    suspect_id: &str,
) -> AppResult<CompositeSketch> {
    let wanted = canonical_board_id(suspect_id);
    let suspect = analysis
        .suspects
        .iter()
        .find(|s| s.suspect_id == wanted)
        .ok_or_else(|| AppError::not_found(format!("Suspect {} not found", wanted)))?;

    let description = suspect
        .key_attributes
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            AppError::validation(format!("Suspect {} has no description", suspect.suspect_id))
        })?;
    build_composite_prompt(description)
}
