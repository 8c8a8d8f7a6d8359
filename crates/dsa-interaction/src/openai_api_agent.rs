//! OpenAI chat-completions backend.
//!
//! Calls the REST API directly with `reqwest`. One request per submission:
//! a single user message, low temperature, no retries.

use async_trait::async_trait;
use dsa_core::{DsaError, ModelClient, ModelConnector, ModelResponse, Result};
use dsa_infrastructure::AppConfig;
use dsa_infrastructure::config_service::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Builds [`OpenAiApiAgent`]s from configured credentials.
#[derive(Clone)]
pub struct OpenAiConnector {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiConnector {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API root (e.g., a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ModelConnector for OpenAiConnector {
    fn connect(&self) -> Result<Arc<dyn ModelClient>> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DsaError::connection(
                    "OpenAI API key not found. Set OPEN_AI_KEY (or OPENAI_API_KEY) in the environment, conf.env or ~/.config/dsa-agent/secret.json",
                )
            })?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DsaError::connection(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!("[OpenAI] Connected (model: {})", self.model);
        Ok(Arc::new(OpenAiApiAgent {
            client,
            api_key: api_key.to_string(),
            model: self.model.clone(),
            endpoint: format!("{}/chat/completions", self.base_url.trim_end_matches('/')),
        }))
    }
}

/// A connected OpenAI chat-completions client.
pub struct OpenAiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[async_trait]
impl ModelClient for OpenAiApiAgent {
    async fn complete(&self, prompt: &str) -> Result<ModelResponse> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: DEFAULT_TEMPERATURE,
        };

        tracing::debug!("[OpenAI] Sending {} prompt bytes to {}", prompt.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DsaError::transport(format!("OpenAI API request timed out: {err}"))
                } else {
                    DsaError::transport(format!("OpenAI API request failed: {err}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| DsaError::transport(format!("Failed to parse OpenAI response: {err}")))?;

        let text = extract_text_response(parsed)?;
        tracing::info!("[OpenAI] Received {} bytes", text.len());
        Ok(ModelResponse::new(text))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(DsaError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: &str) -> DsaError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());
    DsaError::transport(format!("OpenAI API returned {status}: {message}"))
}
