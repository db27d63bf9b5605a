//! NewsAPI client (`/v2/everything`)
//!
//! Developer keys allow 100 requests per day and only return articles up to
//! a month old.

use crate::error::{MarketError, Result};
use crate::models::NewsItem;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

const PROVIDER: &str = "NewsAPI";

/// Domains searched by `get_financial_news`
pub const FINANCIAL_DOMAINS: &str = "reuters.com,bloomberg.com,wsj.com,ft.com,cnbc.com";

/// NewsAPI client
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

/// Parameters for `/v2/everything`
#[derive(Debug, Clone)]
pub struct EverythingQuery {
    pub q: String,
    pub domains: Option<String>,
    pub sources: Option<String>,
    pub from: Option<NaiveDate>,
    pub page_size: u32,
}

impl EverythingQuery {
    /// Query with the defaults used by the tools: English, relevancy-sorted
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            domains: None,
            sources: None,
            from: None,
            page_size: 5,
        }
    }

    /// Restrict to a comma-separated list of domains
    pub fn domains(mut self, domains: impl Into<String>) -> Self {
        self.domains = Some(domains.into());
        self
    }

    /// Restrict to a comma-separated list of NewsAPI source ids
    pub fn sources(mut self, sources: impl Into<String>) -> Self {
        self.sources = Some(sources.into());
        self
    }

    /// Oldest publication date to include
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    /// Maximum number of articles to request
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q.clone()),
            ("language", "en".to_string()),
            ("sortBy", "relevancy".to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(domains) = &self.domains {
            params.push(("domains", domains.clone()));
        }
        if let Some(sources) = &self.sources {
            params.push(("sources", sources.clone()));
        }
        if let Some(from) = self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    source: NewsApiSource,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NewsApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl NewsApiArticle {
    /// Articles without a title or source name are dropped
    fn into_item(self) -> Option<NewsItem> {
        let headline = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let source = self
            .source
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;

        Some(NewsItem {
            headline: headline.to_string(),
            source: source.to_string(),
            published_at: self
                .published_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
            url: self.url.unwrap_or_default().trim().to_string(),
        })
    }
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_key` - NewsAPI key, sent in the `X-Api-Key` header
    /// * `base_url` - API root, normally `https://newsapi.org/v2/`
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Search all articles
    ///
    /// Returns articles in provider order (relevancy), without title/source-less
    /// entries.
    #[instrument(skip(self), fields(q = %query.q))]
    pub async fn everything(&self, query: &EverythingQuery) -> Result<Vec<NewsItem>> {
        let url = self
            .base_url
            .join("everything")
            .map_err(|e| MarketError::ConfigError(format!("Invalid NewsAPI URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies carry {"status":"error","code":..,"message":..}
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<EverythingResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(body);
            return Err(MarketError::HttpStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body: message,
            });
        }

        let body: EverythingResponse = response.json().await.map_err(|e| {
            MarketError::DecodeError {
                provider: PROVIDER,
                message: e.without_url().to_string(),
            }
        })?;

        if body.status != "ok" {
            return Err(MarketError::ProviderError {
                provider: PROVIDER,
                message: body.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let items: Vec<NewsItem> = body
            .articles
            .into_iter()
            .filter_map(NewsApiArticle::into_item)
            .collect();

        debug!(count = items.len(), "NewsAPI search complete");
        Ok(items)
    }
}
