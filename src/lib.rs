//! CrimeBoard - Rust Backend Library
//!
//! This library turns case evidence into a murder board. It includes:
//! - The seven-stage agent pipeline and board assembly
//! - The lane layout engine and simulated image tagging
//! - Composite sketch prompts and evidence text extraction
//! - Storage layer (board store, config)
//! - CLI command handlers, data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::analysis::{BoardAnalysis, OrchestrationResult};
pub use models::settings::AppConfig;
pub use services::analysis::{CaseAnalysisService, RegisterEvidence};
pub use services::orchestrator::{build_final_output, complete_board, AgentStage, Orchestrator};
pub use services::composite::{build_composite_prompt, CompositeSketch};
pub use services::layout::{assign_layout, needs_layout, place_unpositioned};
pub use services::ocr::{extract_text, ExtractedText};
pub use storage::board_store::{BoardStore, InMemoryBoardStore, StoredBoard};
pub use storage::config::ConfigService;
pub use utils::error::{AppError, AppResult};
