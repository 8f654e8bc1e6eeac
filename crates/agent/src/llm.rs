use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use wellnest_core::config::LlmConfig;
use wellnest_core::ApplicationError;

/// A prompt plus the declarative output schema the model must follow.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: Value,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("gateway rejected the request with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway response could not be decoded: {0}")]
    Decode(String),
    #[error("gateway returned no candidate text")]
    EmptyCandidate,
}

/// The generative backend. One call per synthesis, no retries.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}

/// Gemini `generateContent` over HTTPS.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, ApplicationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| ApplicationError::Configuration("llm.api_key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ApplicationError::Integration(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = request_body(request);
        let url = self.endpoint();
        debug!(event_name = "gateway.request", model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        let response_text = response.text().await.map_err(GatewayError::Transport)?;
        debug!(event_name = "gateway.response", status = status.as_u16(), "generateContent returned");

        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body: response_text });
        }

        extract_text(&response_text)
    }
}

fn request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        contents: vec![GeminiContent { parts: vec![GeminiPart { text: &request.prompt }] }],
        generation_config: GeminiGenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.response_schema,
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(raw: &str) -> Result<String, GatewayError> {
    let decoded: GeminiResponse =
        serde_json::from_str(raw).map_err(|error| GatewayError::Decode(error.to_string()))?;

    let text = decoded
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GatewayError::EmptyCandidate);
    }
    Ok(text)
}
