//! CrimeBoard LLM
//!
//! Client side of the hosted agent service:
//! - The `AgentClient` trait every pipeline stage calls through
//! - The Gradient agent client (chat-completion route, bearer auth)
//! - Lenient extraction of a JSON object from free-form agent output

pub mod gradient;
pub mod http_client;
pub mod parser;
pub mod provider;
pub mod types;

// Re-export main types
pub use gradient::GradientAgentClient;
pub use http_client::build_http_client;
pub use parser::{extract_json_object, parse_agent_json};
pub use provider::AgentClient;
pub use types::*;
