// AI implementation using the OpenAI chat completions REST API
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for, how to validate) lives in domains/products.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BaseAI, ChatMessage, CompletionRequest};
use crate::common::UpstreamError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for [`OpenAIClient`].
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Absent keys are reported as a credential error on first use
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat completion client. No client-side timeout is applied.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str, UpstreamError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(UpstreamError::Credential)
    }
}

#[async_trait]
impl BaseAI for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError> {
        let api_key = self.api_key()?;
        let start = std::time::Instant::now();

        let body = ChatCompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                UpstreamError::Service(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(classify_api_error(status, &error_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Service(format!("Unreadable OpenAI response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| UpstreamError::MalformedResponse("No response from OpenAI".into()))?;

        debug!(
            model = %self.config.model,
            duration_ms = start.elapsed().as_millis() as u64,
            response_length = content.len(),
            "OpenAI chat completion"
        );

        Ok(content)
    }
}

fn classify_api_error(status: StatusCode, body: &str) -> UpstreamError {
    if status == StatusCode::UNAUTHORIZED || body.contains("API key") {
        UpstreamError::Credential
    } else {
        UpstreamError::Service(format!("OpenAI API error ({}): {}", status.as_u16(), body))
    }
}
