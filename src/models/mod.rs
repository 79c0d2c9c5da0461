//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod analysis;
pub mod settings;
pub mod stages;

pub use analysis::*;
pub use settings::*;
pub use stages::*;
