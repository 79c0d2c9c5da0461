//! Settings Models
//!
//! Application configuration stored in config.json.

use crimeboard_llm::AgentEndpointConfig;
use serde::{Deserialize, Serialize};

/// Log filter used when neither the config file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "crimeboard=info";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Agent deployment endpoint and credentials
    #[serde(default)]
    pub agent: AgentEndpointConfig,
    /// `tracing` filter directive, e.g. "crimeboard=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentEndpointConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Fill agent settings the file leaves unset from the process environment.
    pub fn apply_env(&mut self) {
        let agent = std::mem::take(&mut self.agent);
        self.agent = agent.or(AgentEndpointConfig::from_env());
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = self.agent.endpoint_url.as_deref() {
            let url = url.trim();
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "Invalid agent endpoint: {}. Must start with http:// or https://",
                    url
                ));
            }
        }

        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".to_string());
        }

        Ok(())
    }
}
