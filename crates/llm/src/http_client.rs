//! HTTP Client Factory
//!
//! Builds the `reqwest` client used for agent calls.

/// User agent sent with every agent call.
pub const USER_AGENT: &str = concat!("crimeboard/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` for the agent service.
///
/// No request timeout is configured; the transport's own defaults apply.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("[Agent] Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}
