//! HTTP client for an OpenAI-compatible chat-completions API.
//!
//! [`LlmClient`] holds the configuration for one upstream endpoint and
//! implements [`GenerationGateway`] over `reqwest`. The request deadline
//! is enforced by the underlying HTTP client, so a hung upstream surfaces
//! as [`GatewayError::Timeout`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{GatewayError, GenerationGateway};

/// System prompt sent with every generation request.
const SYSTEM_PROMPT: &str = "You are an expert software development assistant \
specialized in the Vibe Coding style. Turn the user's project idea into \
high-quality structured documentation following development best practices.";

/// Configuration for the generation client, loaded from environment
/// variables.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key sent as a Bearer token.
    pub api_key: String,
    /// Model identifier (default: `gpt-4`).
    pub model: String,
    /// Base URL of the chat-completions API
    /// (default: `https://api.openai.com/v1`).
    pub base_url: String,
    /// Request deadline in seconds (default: `60`).
    pub timeout_secs: u64,
    /// Maximum tokens in the generated response (default: `2000`).
    pub max_tokens: u32,
    /// Sampling temperature (default: `0.7`).
    pub temperature: f64,
}

impl LlmConfig {
    /// Load generation configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                       |
    /// |---------------------------|----------|-------------------------------|
    /// | `OPENAI_API_KEY`          | **yes**  | --                            |
    /// | `OPENAI_MODEL`            | no       | `gpt-4`                       |
    /// | `OPENAI_BASE_URL`         | no       | `https://api.openai.com/v1`   |
    /// | `GENERATION_TIMEOUT_SECS` | no       | `60`                          |
    /// | `GENERATION_MAX_TOKENS`   | no       | `2000`                        |
    /// | `GENERATION_TEMPERATURE`  | no       | `0.7`                         |
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is not set or a numeric override fails
    /// to parse; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".into());

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());

        let timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("GENERATION_TIMEOUT_SECS must be a valid u64");

        let max_tokens: u32 = std::env::var("GENERATION_MAX_TOKENS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("GENERATION_MAX_TOKENS must be a valid u32");

        let temperature: f64 = std::env::var("GENERATION_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".into())
            .parse()
            .expect("GENERATION_TEMPERATURE must be a valid f64");

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
            max_tokens,
            temperature,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for one OpenAI-compatible chat-completions endpoint.
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Build a client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed (TLS backend
    /// unavailable), which should fail at startup.
    pub fn new(config: LlmConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { config, http }
    }

    /// Model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl GenerationGateway for LlmClient {
    async fn submit(&self, prompt_text: &str) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt_text,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        tracing::info!(model = %self.config.model, "Submitting generation request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Upstream(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "Upstream returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Malformed response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Upstream("No choices in response".to_string()))?;

        tracing::info!(length = content.len(), "Generation completed");

        Ok(content)
    }
}
