//! Generation Gateway: the boundary to the external text-generation
//! service.
//!
//! [`GenerationGateway`] is the single seam the rest of the system sees:
//! one call in, generated text or a typed failure out. [`client::LlmClient`]
//! implements it against an OpenAI-compatible chat-completions API.

pub mod client;

use async_trait::async_trait;

/// Typed failures from the generation service.
///
/// The lifecycle layer records all of these as a `failed` prompt status;
/// the distinction exists for logging and for the sanitized failure
/// category surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream service rejected the request for rate reasons.
    #[error("Generation service rate limit exceeded")]
    RateLimited,

    /// The request did not complete within the configured deadline.
    #[error("Generation request timed out")]
    Timeout,

    /// Any other upstream failure (transport, auth, malformed response).
    #[error("Generation service error: {0}")]
    Upstream(String),
}

impl GatewayError {
    /// Stable category label safe to return to API callers.
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::RateLimited => "rate_limited",
            GatewayError::Timeout => "timeout",
            GatewayError::Upstream(_) => "upstream_error",
        }
    }
}

/// A text-generation service.
///
/// One logical call: prompt text in, generated text or a typed failure
/// out. No retries here; retrying is the caller's decision and in this
/// system is the user-driven `failed -> generating` path.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn submit(&self, prompt_text: &str) -> Result<String, GatewayError>;
}
