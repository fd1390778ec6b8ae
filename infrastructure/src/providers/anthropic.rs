//! Anthropic Messages API adapter
//!
//! Implements [`LlmGateway`] over `POST {base_url}/v1/messages`. Every
//! session is single-turn: one user message in, the concatenated text blocks
//! of the reply out.

use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use triage_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use triage_domain::Model;

/// Resolved connection settings
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AnthropicSettings {
    /// Settings from the `[providers.anthropic]` section.
    ///
    /// Fails when no API key is configured or exported.
    pub fn from_file_config(config: &FileAnthropicConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GatewayError::AuthenticationError(config.missing_key_issue().message))?;
        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
        })
    }
}

struct Inner {
    client: reqwest::Client,
    messages_url: String,
    max_tokens: u32,
}

/// Gateway backed by the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicGateway {
    inner: Arc<Inner>,
}

impl AnthropicGateway {
    pub fn new(settings: AnthropicSettings) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&settings.api_key)
            .map_err(|_| GatewayError::AuthenticationError("invalid API key format".into()))?;
        headers.insert("x-api-key", key);
        let version = HeaderValue::from_str(&settings.api_version)
            .map_err(|_| GatewayError::Other("invalid anthropic-version header".into()))?;
        headers.insert("anthropic-version", version);

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                messages_url: format!("{}/v1/messages", settings.base_url.trim_end_matches('/')),
                max_tokens: settings.max_tokens,
            }),
        })
    }
}

#[async_trait]
impl LlmGateway for AnthropicGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(AnthropicSession {
            inner: Arc::clone(&self.inner),
            model: model.clone(),
        }))
    }
}

/// One single-turn exchange with a model
pub struct AnthropicSession {
    inner: Arc<Inner>,
    model: Model,
}

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ApiMessage<'a>; 1],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

// =============================================================================
// SESSION IMPL
// =============================================================================

#[async_trait]
impl LlmSession for AnthropicSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = MessagesRequest {
            model: self.model.as_str(),
            max_tokens: self.inner.max_tokens,
            messages: [ApiMessage {
                role: "user",
                content,
            }],
        };

        debug!(model = %self.model, prompt_chars = content.len(), "Sending message");

        let response = self
            .inner
            .client
            .post(&self.inner.messages_url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("invalid JSON: {e}")))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(GatewayError::InvalidResponse(
                "no text content in response".into(),
            ));
        }
        Ok(text)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let code = status.as_u16();
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty());

    match code {
        401 | 403 => GatewayError::AuthenticationError(detail.unwrap_or_else(|| format!("HTTP {code}"))),
        404 => GatewayError::ModelNotAvailable(detail.unwrap_or_else(|| format!("HTTP {code}"))),
        429 => GatewayError::RateLimited(detail.unwrap_or_else(|| format!("HTTP {code}"))),
        _ => GatewayError::RequestFailed(match detail {
            Some(message) => format!("HTTP {code}: {message}"),
            None => format!("HTTP {code}"),
        }),
    }
}
