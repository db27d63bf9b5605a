//! API clients for the upstream data providers

pub mod alpha_vantage;
pub mod gemini;
pub mod google_news;
pub mod news_api;

pub use alpha_vantage::{AlphaVantageClient, GlobalQuote, SymbolMatch};
pub use gemini::GeminiClient;
pub use google_news::GoogleNewsClient;
pub use news_api::{EverythingQuery, NewsApiClient};

use crate::config::{ApiProvider, IntelConfig};
use crate::error::{MarketError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Build the HTTP client shared by every provider
///
/// One connection pool per process; each request is bounded by the
/// configured timeout.
pub fn build_http_client(config: &IntelConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| MarketError::ConfigError(format!("Failed to build HTTP client: {e}")))
}

/// All upstream clients, each present only when its key is configured
#[derive(Clone)]
pub struct MarketClients {
    alpha_vantage: Option<AlphaVantageClient>,
    news_api: Option<NewsApiClient>,
    google_news: GoogleNewsClient,
    gemini: Option<GeminiClient>,
}

impl MarketClients {
    /// Create the clients from configuration
    pub fn from_config(config: &IntelConfig) -> Result<Self> {
        let http = build_http_client(config)?;
        let endpoints = &config.endpoints;

        Ok(Self {
            alpha_vantage: config.alpha_vantage_api_key.as_ref().map(|key| {
                AlphaVantageClient::new(http.clone(), key.clone(), endpoints.alpha_vantage.clone())
            }),
            news_api: config
                .news_api_key
                .as_ref()
                .map(|key| NewsApiClient::new(http.clone(), key.clone(), endpoints.news_api.clone())),
            google_news: GoogleNewsClient::new(http.clone(), endpoints.google_news.clone()),
            gemini: config.gemini_api_key.as_ref().map(|key| {
                GeminiClient::new(
                    http.clone(),
                    key.clone(),
                    endpoints.gemini.clone(),
                    config.gemini_model.clone(),
                )
            }),
        })
    }

    /// Alpha Vantage client, or `MissingApiKey`
    pub fn alpha_vantage(&self) -> Result<&AlphaVantageClient> {
        self.alpha_vantage
            .as_ref()
            .ok_or_else(|| ApiProvider::AlphaVantage.missing_key_error())
    }

    /// NewsAPI client, or `MissingApiKey`
    pub fn news_api(&self) -> Result<&NewsApiClient> {
        self.news_api
            .as_ref()
            .ok_or_else(|| ApiProvider::NewsApi.missing_key_error())
    }

    /// Google News client (always available)
    pub fn google_news(&self) -> &GoogleNewsClient {
        &self.google_news
    }

    /// Gemini client, or `MissingApiKey`
    pub fn gemini(&self) -> Result<&GeminiClient> {
        self.gemini
            .as_ref()
            .ok_or_else(|| ApiProvider::Gemini.missing_key_error())
    }
}

/// Check the status and decode a JSON body
async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MarketError::HttpStatus {
            provider,
            status: status.as_u16(),
            body: truncate(&body, 300),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| MarketError::DecodeError {
            provider,
            message: e.without_url().to_string(),
        })
}

/// Check the status and return the raw body
async fn read_text(provider: &'static str, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(MarketError::HttpStatus {
            provider,
            status: status.as_u16(),
            body: truncate(&body, 300),
        });
    }
    Ok(body)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
