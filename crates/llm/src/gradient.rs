//! Gradient Agent Client
//!
//! Calls a hosted agent deployment through its OpenAI-style
//! chat-completion route with bearer authentication.

use async_trait::async_trait;

use super::provider::{not_configured_error, parse_http_error, AgentClient};
use super::types::{
    AgentEndpointConfig, ChatCompletionRequest, ChatCompletionResponse, LlmError, LlmResult,
    EMPTY_AGENT_RESPONSE,
};
use crate::http_client::build_http_client;

/// Agent client for a Gradient agent deployment.
pub struct GradientAgentClient {
    config: AgentEndpointConfig,
    client: reqwest::Client,
}

impl GradientAgentClient {
    /// Create a new client with the given endpoint configuration
    pub fn new(config: AgentEndpointConfig) -> Self {
        Self {
            config,
            client: build_http_client(),
        }
    }

    /// Create a client from `GRADIENT_AGENT_ENDPOINT` / `GRADIENT_ACCESS_KEY`
    pub fn from_env() -> Self {
        Self::new(AgentEndpointConfig::from_env())
    }

    pub fn config(&self) -> &AgentEndpointConfig {
        &self.config
    }

    /// Perform the call, surfacing every failure as an [`LlmError`].
    ///
    /// A successful response without any choice content yields
    /// [`EMPTY_AGENT_RESPONSE`].
    pub async fn try_call(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        let url = self
            .config
            .completions_url()
            .ok_or_else(|| not_configured_error("agent endpoint"))?;
        let access_key = self
            .config
            .access_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| not_configured_error("agent access key"))?;

        tracing::debug!(
            "[Agent] POST {} (system {} chars, user {} chars)",
            url,
            system_prompt.len(),
            user_prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_key))
            .header("Content-Type", "application/json")
            .json(&ChatCompletionRequest::new(system_prompt, user_prompt))
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body_text));
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        Ok(completion
            .first_content()
            .unwrap_or(EMPTY_AGENT_RESPONSE)
            .to_string())
    }
}

#[async_trait]
impl AgentClient for GradientAgentClient {
    fn name(&self) -> &'static str {
        "gradient"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> String {
        match self.try_call(system_prompt, user_prompt).await {
            Ok(content) => content,
            Err(LlmError::NotConfigured { message }) => {
                tracing::warn!("[Agent] Skipping call: {}", message);
                EMPTY_AGENT_RESPONSE.to_string()
            }
            Err(e) => {
                tracing::warn!("[Agent] Call failed: {}", e);
                EMPTY_AGENT_RESPONSE.to_string()
            }
        }
    }
}
