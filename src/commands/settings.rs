//! Settings Commands
//!
//! Showing and initializing the configuration file.

use std::path::Path;

use serde::Serialize;

use crate::models::settings::AppConfig;
use crate::storage::config::ConfigService;
use crate::utils::error::AppResult;

/// Configuration as printed by the CLI. The access key is masked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub config_path: String,
    pub endpoint_url: Option<String>,
    pub access_key: Option<String>,
    pub agent_configured: bool,
    pub log_filter: String,
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// View of the effective settings (file values, then environment).
pub fn show_settings(service: &ConfigService) -> SettingsView {
    let config: AppConfig = service.effective_config();
    SettingsView {
        config_path: service.config_path().display().to_string(),
        endpoint_url: config.agent.endpoint_url.clone(),
        access_key: config.agent.access_key.as_deref().map(mask_key),
        agent_configured: config.agent.is_configured(),
        log_filter: config.log_filter,
    }
}

/// Write a default configuration file at `path`, replacing any existing one.
pub fn init_settings(path: &Path) -> AppResult<ConfigService> {
    let mut service = ConfigService::load(path)?;
    service.reset()?;
    tracing::info!("[Config] Wrote default config to {}", path.display());
    Ok(service)
}
