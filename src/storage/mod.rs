//! Storage Layer
//!
//! Handles data persistence: the board store and the JSON config file.

pub mod board_store;
pub mod config;

pub use board_store::*;
pub use config::*;
