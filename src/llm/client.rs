//! OpenAI-compatible chat-completion client.
//!
//! Both supported providers speak the same `/chat/completions` wire format;
//! only the base URL and model names differ (see [`Provider`]).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::llm::Provider;

/// Timeout for every API request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum characters of an error body echoed back to the user.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A chat-completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Build a request carrying a single user-role message.
    pub fn user(model: &str, content: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
            max_tokens,
        }
    }
}

/// The part of a chat-completion response this tool cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub provider: Provider,
    /// `choices[0].message.content`, when present.
    pub content: Option<String>,
}

impl Completion {
    /// The generated text, or [`LlmError::MalformedResponse`] if the response had none.
    pub fn into_text(self) -> Result<String, LlmError> {
        self.content.ok_or(LlmError::MalformedResponse {
            provider: self.provider,
            reason: "missing choices[0].message.content".to_string(),
        })
    }
}

/// Anything that can answer a chat-completion request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, request: &ChatRequest) -> Result<Completion, LlmError>;
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client bound to one provider and API key.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    provider: Provider,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ChatClient {
    /// Create a client for the provider's default endpoint.
    pub fn new(provider: Provider, api_key: &str) -> Result<Self, LlmError> {
        Self::with_base_url(provider, api_key, provider.base_url())
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(
        provider: Provider,
        api_key: &str,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| LlmError::Transport { provider, source })?;

        Ok(Self {
            http,
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_error(&self, source: reqwest::Error) -> LlmError {
        if source.is_timeout() {
            LlmError::Timeout {
                provider: self.provider,
                secs: REQUEST_TIMEOUT_SECS,
            }
        } else {
            LlmError::Transport {
                provider: self.provider,
                source,
            }
        }
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Completion, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            "POST {} model={} max_tokens={}",
            url, request.model, request.max_tokens
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            return Err(LlmError::Status {
                provider: self.provider,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse {
                provider: self.provider,
                reason: e.to_string(),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        Ok(Completion {
            provider: self.provider,
            content,
        })
    }
}

/// Builds [`ChatClient`]s once the provider and key are known.
///
/// The default connector uses each provider's own endpoint; an override
/// points every provider at one base URL (used by tests against a mock server).
#[derive(Debug, Clone, Default)]
pub struct Connector {
    base_url: Option<String>,
}

impl Connector {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    pub fn connect(&self, provider: Provider, api_key: &str) -> Result<ChatClient, LlmError> {
        match &self.base_url {
            Some(url) => ChatClient::with_base_url(provider, api_key, url),
            None => ChatClient::new(provider, api_key),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// OpenAI-compatible APIs wrap errors as `{"error": {"message": "..."}}`;
/// anything else is echoed back truncated.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
