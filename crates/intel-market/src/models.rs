//! Request-scoped records returned by the tools
//!
//! None of these are persisted; each is built for one invocation and dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candidate from a ticker-symbol search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMatch {
    pub ticker: String,
    pub name: String,
    #[serde(rename = "type")]
    pub security_type: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// Result of `search_ticker_symbol`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSearch {
    pub found: bool,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<TickerMatch>,
    pub suggestions: Vec<TickerMatch>,
    pub message: String,
}

/// How the briefing arrived at its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Caller passed `stock_ticker` explicitly
    Explicit,
    /// Input already looked like a symbol
    Symbol,
    /// Resolved through ticker search
    Search,
}

/// Company name or symbol resolved to a tradable symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuery {
    pub query: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    pub resolution: Resolution,
}

/// Latest quote for one symbol
///
/// Missing fields deserialize as zero or empty, since a snapshot echoed back by
/// the host model may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub change: f64,
    /// Percent change as a number (`1.25` means +1.25%)
    pub change_percent: f64,
    pub volume: u64,
    pub latest_trading_day: String,
    pub volume_millions: f64,
    pub day_range: f64,
    pub day_range_percent: f64,
    pub price_vs_open_percent: f64,
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self::new(String::new(), 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0, String::new())
    }
}

impl PriceSnapshot {
    /// Build a snapshot, filling in the derived metrics
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        open: f64,
        high: f64,
        low: f64,
        previous_close: f64,
        change: f64,
        change_percent: f64,
        volume: u64,
        latest_trading_day: impl Into<String>,
    ) -> Self {
        let day_range = high - low;
        Self {
            symbol: symbol.into(),
            price,
            open,
            high,
            low,
            previous_close,
            change,
            change_percent,
            volume,
            latest_trading_day: latest_trading_day.into(),
            volume_millions: round2(volume as f64 / 1_000_000.0),
            day_range: round2(day_range),
            day_range_percent: round2(ratio_percent(day_range, low)),
            price_vs_open_percent: round2(ratio_percent(price - open, open)),
        }
    }

    /// Direction of the last move
    pub fn movement(&self) -> PriceMovement {
        if self.change > 0.0 {
            PriceMovement::Positive
        } else {
            PriceMovement::Negative
        }
    }
}

/// One news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(alias = "title")]
    pub headline: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, alias = "published")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

/// Order articles newest first; undated articles keep their relative order
/// and go last.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Up or down since the previous close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceMovement {
    Positive,
    Negative,
}

/// Headline numbers attached to an AI summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub price_movement: PriceMovement,
    pub volume_millions: f64,
    /// Day range as a percentage of the low
    pub volatility: f64,
}

/// Result of `summarize_company_insights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInsights {
    pub summary: String,
    pub company: String,
    pub stock_symbol: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub analysis_timestamp: DateTime<Utc>,
    pub news_count: usize,
    pub key_metrics: KeyMetrics,
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
