// Gemini generateContent client.
//
// One client per process, shared behind the app state. The v1 surface
// authenticates with the API key in the query string, so the request URL
// must never be logged.
//
// API docs: https://ai.google.dev/api/generate-content

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::GenerateError;
use crate::gemini::types::{GenerateContentRequest, GenerateContentResponse};

/// Public API root for the stable v1 surface.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against an API root. `base_url` defaults to the
    /// public endpoint in config and is overridable for tests or proxies.
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("versiculo/0.1 (instagram-post-generator)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// POST a JSON body to `models/{model}:generateContent` and return the
    /// response body on success.
    ///
    /// A non-success upstream status becomes [`GenerateError::Upstream`]
    /// carrying the message dug out of Gemini's error envelope; network
    /// failures and undecodable bodies become [`GenerateError::Transport`].
    pub async fn generate_content<B>(&self, body: &B) -> Result<Value, GenerateError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let data: Value = response.json().await?;

        if !status.is_success() {
            let message = upstream_message(&data);
            debug!(status = status.as_u16(), %message, "Gemini API returned an error");
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(data)
    }

    /// Full text round trip: send a prompt with the fixed generation
    /// settings, return the first candidate's text. An empty or shape-less
    /// 200 response yields an empty string, not an error; whether that is
    /// usable is the parser's call.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let data = self.generate_content(&request).await?;

        let response: GenerateContentResponse = serde_json::from_value(data).unwrap_or_default();
        let text = response.first_text().to_string();
        debug!(chars = text.len(), "Gemini returned candidate text");
        Ok(text)
    }
}

/// Best-effort extraction of a human-readable message from Gemini's error
/// envelope: `error.message` first, then a bare string `error`, then the
/// whole `error` value as JSON, then a generic fallback.
fn upstream_message(body: &Value) -> String {
    let error = &body["error"];
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    match error {
        Value::Null => "Erro desconhecido na API Gemini".to_string(),
        Value::String(s) if s.is_empty() => "Erro desconhecido na API Gemini".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
