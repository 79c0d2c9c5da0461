//! Agent Client Trait
//!
//! Defines the interface every pipeline stage calls through.

use async_trait::async_trait;

use super::types::LlmError;

/// A single structured completion against the agent service.
///
/// Implementations never fail: any transport, configuration, or status
/// problem is logged and answered with [`EMPTY_AGENT_RESPONSE`](crate::types::EMPTY_AGENT_RESPONSE)
/// so a pipeline stage degrades instead of aborting the run. There is no
/// retry and no backoff at this layer.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Returns the client name for identification in logs.
    fn name(&self) -> &'static str;

    /// Send a system prompt and a user prompt, returning the raw reply text.
    async fn call(&self, system_prompt: &str, user_prompt: &str) -> String;
}

/// Helper function to create an error for a missing endpoint or access key
pub fn not_configured_error(what: &str) -> LlmError {
    LlmError::NotConfigured {
        message: format!("{} not configured", what),
    }
}

/// Helper function to map HTTP error status codes
pub fn parse_http_error(status: u16, body: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: "Invalid access key".to_string(),
        },
        403 => LlmError::AuthenticationFailed {
            message: "Access denied".to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 | 404 | 422 => LlmError::InvalidRequest {
            message: format!("HTTP {}: {}", status, body),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
