//! Google Gemini `generateContent` client

use crate::error::{MarketError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

const PROVIDER: &str = "Gemini";

/// Gemini text generation client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_key` - Gemini API key, sent in the `x-goog-api-key` header
    /// * `base_url` - API root, normally `https://generativelanguage.googleapis.com/v1beta/`
    /// * `model` - Model id, e.g. `gemini-2.5-flash`
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: Url,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url,
            model: model.into(),
        }
    }

    /// Model this client generates with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a single-turn prompt
    ///
    /// One attempt only; an empty or blocked completion is a decode error.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|e| MarketError::ConfigError(format!("Invalid Gemini URL: {e}")))?;

        let body = json!({
            "contents": [
                { "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: GenerateResponse = super::read_json(PROVIDER, response).await?;
        let text = parsed.into_text().ok_or_else(|| MarketError::DecodeError {
            provider: PROVIDER,
            message: "response contained no text".to_string(),
        })?;

        debug!(chars = text.len(), "Gemini generation complete");
        Ok(text)
    }
}
