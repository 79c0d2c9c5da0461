//! Core Error Types
//!
//! Defines the foundational error types used across the CrimeBoard workspace.
//! These error types are dependency-free (only thiserror + std) to keep the core
//! crate lightweight.
//!
//! The main application crate extends these with store and I/O variants.

use thiserror::Error;

/// Core error type for the CrimeBoard workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (bad titles, illegal status transitions)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
