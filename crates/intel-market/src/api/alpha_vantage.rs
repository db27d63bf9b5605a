//! Alpha Vantage API client
//!
//! Covers the two endpoints the tools need: `SYMBOL_SEARCH` and
//! `GLOBAL_QUOTE`. Free-tier keys are limited to 25 requests per day; the
//! limit is reported in-band as a `Note`/`Information` field with HTTP 200.

use crate::error::{MarketError, Result};
use crate::models::{PriceSnapshot, TickerMatch};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage API client
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

/// One entry of `bestMatches`
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name", default)]
    pub name: String,
    #[serde(rename = "3. type", default)]
    pub security_type: String,
    #[serde(rename = "4. region", default)]
    pub region: String,
    #[serde(rename = "8. currency", default)]
    pub currency: Option<String>,
    #[serde(rename = "9. matchScore", default)]
    pub match_score: Option<String>,
}

impl From<SymbolMatch> for TickerMatch {
    fn from(m: SymbolMatch) -> Self {
        TickerMatch {
            ticker: m.symbol,
            name: m.name,
            security_type: m.security_type,
            region: m.region,
            currency: m.currency.filter(|c| !c.is_empty()),
            match_score: m.match_score.and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SymbolMatch>,
}

/// Body of `Global Quote`, all fields as the provider sends them (strings)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "02. open", default)]
    pub open: Option<String>,
    #[serde(rename = "03. high", default)]
    pub high: Option<String>,
    #[serde(rename = "04. low", default)]
    pub low: Option<String>,
    #[serde(rename = "05. price", default)]
    pub price: Option<String>,
    #[serde(rename = "06. volume", default)]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day", default)]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close", default)]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change", default)]
    pub change: Option<String>,
    #[serde(rename = "10. change percent", default)]
    pub change_percent: Option<String>,
}

impl GlobalQuote {
    /// Convert to a snapshot; `requested` is used when the quote omits its symbol
    pub fn into_snapshot(self, requested: &str) -> Result<PriceSnapshot> {
        let price_raw = self
            .price
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MarketError::NotFound(format!("No valid quote for '{requested}'.")))?;

        let price: f64 = price_raw.parse().map_err(|_| MarketError::DecodeError {
            provider: PROVIDER,
            message: format!("price '{price_raw}' is not a number"),
        })?;

        let change_percent = self
            .change_percent
            .as_deref()
            .map(|p| p.trim().trim_end_matches('%'))
            .map_or(0.0, |p| p.parse().unwrap_or(0.0));

        let symbol = self
            .symbol
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| requested.to_string());

        Ok(PriceSnapshot::new(
            symbol,
            price,
            number(self.open.as_deref()),
            number(self.high.as_deref()),
            number(self.low.as_deref()),
            number(self.previous_close.as_deref()),
            number(self.change.as_deref()),
            change_percent,
            volume(self.volume.as_deref()),
            self.latest_trading_day.unwrap_or_default(),
        ))
    }
}

fn number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}

// Volume is a count; negative or garbled values collapse to zero.
fn volume(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    raw.parse::<u64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| *v > 0.0).map(|v| v as u64))
        .unwrap_or(0)
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_key` - Alpha Vantage API key
    /// * `base_url` - Query endpoint, normally `https://www.alphavantage.co/query`
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let data: Value = super::read_json(PROVIDER, response).await?;
        check_provider_errors(&data)?;
        Ok(data)
    }

    /// Search for symbols matching a company name or keywords
    #[instrument(skip(self))]
    pub async fn search_symbol(&self, keywords: &str) -> Result<Vec<SymbolMatch>> {
        let data = self
            .query(&[("function", "SYMBOL_SEARCH"), ("keywords", keywords)])
            .await?;

        let parsed: SymbolSearchResponse =
            serde_json::from_value(data).map_err(|e| MarketError::DecodeError {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        debug!(matches = parsed.best_matches.len(), "Symbol search complete");
        Ok(parsed.best_matches)
    }

    /// Get the global quote (latest price data) for a symbol
    ///
    /// An unknown symbol comes back as an empty `Global Quote` object and is
    /// reported as `NotFound`.
    #[instrument(skip(self))]
    pub async fn get_quote(&self, symbol: &str) -> Result<GlobalQuote> {
        let data = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;

        let quote = data
            .get("Global Quote")
            .filter(|q| q.as_object().is_some_and(|o| !o.is_empty()))
            .ok_or_else(|| MarketError::NotFound(format!("No valid quote for '{symbol}'.")))?;

        Ok(serde_json::from_value(quote.clone())?)
    }
}

/// Alpha Vantage reports most failures with HTTP 200 and a marker field
fn check_provider_errors(data: &Value) -> Result<()> {
    if let Some(message) = data.get("Error Message").and_then(Value::as_str) {
        return Err(MarketError::ProviderError {
            provider: PROVIDER,
            message: message.to_string(),
        });
    }

    if let Some(note) = data
        .get("Note")
        .or_else(|| data.get("Information"))
        .and_then(Value::as_str)
    {
        return Err(MarketError::RateLimitExceeded {
            provider: PROVIDER,
            message: note.to_string(),
        });
    }

    Ok(())
}
