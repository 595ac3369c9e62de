//! Gemini API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{GenAiError, GenAiResult};
use crate::port::TextGenerator;
use crate::prompt::PromptRequest;
use crate::types::{GeminiRequest, GeminiResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Model name, e.g. gemini-2.0-flash
    pub model: String,
    /// Base URL of the API (overridable for tests)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenAiError::config("GEMINI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }
}

/// Gemini API client.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> GenAiResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GenAiError::config("Gemini API key is empty"));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenAiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the full prompt text: rendered template plus output contract.
    fn build_prompt(&self, prompt: &PromptRequest) -> String {
        let schema = serde_json::to_string_pretty(&prompt.output_schema).unwrap_or_default();
        format!(
            r#"{body}

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object matching this JSON Schema and nothing else:
{schema}
"#,
            body = prompt.render().trim_end(),
        )
    }

    async fn call_gemini_api(&self, text: String) -> GenAiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GeminiRequest::json(text))
            .send()
            .await
            .map_err(|e| GenAiError::request_failed(format!("Gemini API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Status { status, body });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            GenAiError::invalid_output(format!("Failed to parse Gemini response: {}", e))
        })?;

        gemini_response
            .first_text()
            .map(str::to_string)
            .ok_or(GenAiError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &PromptRequest) -> GenAiResult<Value> {
        debug!(prompt = prompt.name, model = %self.config.model, "Calling Gemini");

        let text = self.call_gemini_api(self.build_prompt(prompt)).await?;
        let value = parse_json_output(&text).map_err(|e| {
            warn!(prompt = prompt.name, "Gemini returned non-JSON output: {}", e);
            e
        })?;

        info!(prompt = prompt.name, model = %self.config.model, "Gemini generation succeeded");
        Ok(value)
    }

    fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

/// Parse model output as JSON, tolerating a markdown code fence around it.
pub fn parse_json_output(text: &str) -> GenAiResult<Value> {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    serde_json::from_str(text.trim())
        .map_err(|e| GenAiError::invalid_output(format!("Output is not valid JSON: {}", e)))
}
