//! Agent Service Types
//!
//! Endpoint configuration, wire types for the chat-completion endpoint, and
//! the error type for agent calls.

use serde::{Deserialize, Serialize};

/// Path of the chat-completion route on an agent deployment.
pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Environment variable holding the agent deployment URL.
pub const ENDPOINT_ENV_VAR: &str = "GRADIENT_AGENT_ENDPOINT";

/// Environment variable holding the agent access key.
pub const ACCESS_KEY_ENV_VAR: &str = "GRADIENT_ACCESS_KEY";

/// The sentinel returned by an agent call that could not produce output.
pub const EMPTY_AGENT_RESPONSE: &str = "{}";

/// Where the agent service lives and how to authenticate against it.
///
/// Built once (from a config file or the environment) and handed to the
/// client at construction; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentEndpointConfig {
    /// Agent deployment URL, with or without the completions path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Bearer token. Excluded from serialization to avoid accidental persistence.
    #[serde(default, skip_serializing)]
    pub access_key: Option<String>,
}

impl AgentEndpointConfig {
    pub fn new(endpoint_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            access_key: Some(access_key.into()),
        }
    }

    /// Read `GRADIENT_AGENT_ENDPOINT` and `GRADIENT_ACCESS_KEY`.
    pub fn from_env() -> Self {
        Self {
            endpoint_url: non_empty(std::env::var(ENDPOINT_ENV_VAR).ok()),
            access_key: non_empty(std::env::var(ACCESS_KEY_ENV_VAR).ok()),
        }
    }

    /// Fill unset fields from `other`.
    pub fn or(self, other: AgentEndpointConfig) -> Self {
        Self {
            endpoint_url: non_empty(self.endpoint_url).or(non_empty(other.endpoint_url)),
            access_key: non_empty(self.access_key).or(non_empty(other.access_key)),
        }
    }

    /// Full completions URL, or `None` when no endpoint is configured.
    ///
    /// A trailing slash is stripped and the completions path appended unless
    /// the URL already ends with it.
    pub fn completions_url(&self) -> Option<String> {
        let raw = self.endpoint_url.as_deref()?.trim();
        let endpoint = raw.trim_end_matches('/');
        if endpoint.is_empty() {
            return None;
        }
        if endpoint.ends_with(COMPLETIONS_PATH) {
            Some(endpoint.to_string())
        } else {
            Some(format!("{}{}", endpoint, COMPLETIONS_PATH))
        }
    }

    pub fn is_configured(&self) -> bool {
        self.completions_url().is_some()
            && self
                .access_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request body of the chat-completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub include_functions_info: bool,
    pub include_retrieval_info: bool,
    pub include_guardrails_info: bool,
}

impl ChatCompletionRequest {
    /// Non-streaming request with a system and a user message.
    pub fn new(system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            stream: false,
            include_functions_info: false,
            include_retrieval_info: false,
            include_guardrails_info: false,
        }
    }
}

/// Response body of the chat-completion endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, when present and non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

/// Error from an agent call.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Endpoint or access key missing
    NotConfigured { message: String },
    /// Authentication failed (invalid access key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the agent service
    ServerError { message: String, status: Option<u16> },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::NotConfigured { message } => write!(f, "Not configured: {}", message),
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message } => write!(f, "Rate limited: {}", message),
            LlmError::InvalidRequest { message } => write!(f, "Invalid request: {}", message),
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => write!(f, "Network error: {}", message),
            LlmError::ParseError { message } => write!(f, "Parse error: {}", message),
            LlmError::Other { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type alias for agent calls
pub type LlmResult<T> = Result<T, LlmError>;
