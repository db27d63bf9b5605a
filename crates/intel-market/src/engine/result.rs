//! Briefing result types

use chrono::{DateTime, Utc};
use intel_core::{Result, ToolError};
use serde::{Deserialize, Serialize};

use crate::models::{CompanyInsights, NewsItem, PriceSnapshot, TickerQuery};

/// Outcome of one sub-fetch inside a briefing
///
/// Serializes as `{"status": "ok", "data": ..}` or
/// `{"status": "unavailable", "error": {"kind": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome<T> {
    Ok { data: T },
    Unavailable { error: ToolError },
}

impl<T> FetchOutcome<T> {
    pub fn ok(data: T) -> Self {
        Self::Ok { data }
    }

    pub fn unavailable(error: ToolError) -> Self {
        Self::Unavailable { error }
    }

    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::unavailable(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok { data } => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Ok { .. } => None,
            Self::Unavailable { error } => Some(error),
        }
    }
}

/// Composite report for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    /// Company as the caller named it
    pub company: String,
    pub ticker: TickerQuery,
    pub stock_performance: FetchOutcome<PriceSnapshot>,
    pub news: FetchOutcome<Vec<NewsItem>>,
    pub insights: FetchOutcome<CompanyInsights>,
    /// Providers that contributed data, in the order they were used
    pub data_sources: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// Markdown rendering of everything above
    pub formatted_briefing: String,
}

impl Briefing {
    /// Assemble the briefing and render its Markdown
    pub fn new(
        company: impl Into<String>,
        ticker: TickerQuery,
        stock_performance: FetchOutcome<PriceSnapshot>,
        news: FetchOutcome<Vec<NewsItem>>,
        insights: FetchOutcome<CompanyInsights>,
        data_sources: Vec<String>,
    ) -> Self {
        let mut briefing = Self {
            company: company.into(),
            ticker,
            stock_performance,
            news,
            insights,
            data_sources,
            generated_at: Utc::now(),
            formatted_briefing: String::new(),
        };
        briefing.formatted_briefing = briefing.render_markdown();
        briefing
    }

    /// Render the report as Markdown
    pub fn render_markdown(&self) -> String {
        let mut out = format!(
            "## {} ({}) - Company Briefing\n\n### Stock Performance\n",
            self.company, self.ticker.symbol
        );

        match &self.stock_performance {
            FetchOutcome::Ok { data } => {
                let sign = if data.change >= 0.0 { "+" } else { "-" };
                let trading_day = if data.latest_trading_day.is_empty() {
                    "N/A"
                } else {
                    data.latest_trading_day.as_str()
                };
                out.push_str(&format!(
                    "| Metric | Value |\n\
                     |---|---|\n\
                     | **Price** | ${:.2} |\n\
                     | **Change** | {sign}${:.2} ({:+.2}%) |\n\
                     | **Day Range** | ${:.2} - ${:.2} |\n\
                     | **Volume** | {:.2}M shares |\n\
                     | **Trading Day** | {trading_day} |\n",
                    data.price,
                    data.change.abs(),
                    data.change_percent,
                    data.low,
                    data.high,
                    data.volume_millions,
                ));
            }
            FetchOutcome::Unavailable { error } => {
                out.push_str(&format!("_Stock data unavailable: {}_\n", error.message()));
            }
        }

        out.push_str("\n### Recent News\n");
        match &self.news {
            FetchOutcome::Ok { data } if data.is_empty() => {
                out.push_str("_No recent news articles found._\n");
            }
            FetchOutcome::Ok { data } => {
                for (i, item) in data.iter().enumerate() {
                    if item.url.is_empty() {
                        out.push_str(&format!("{}. {} - {}\n", i + 1, item.headline, item.source));
                    } else {
                        out.push_str(&format!(
                            "{}. [{}]({}) - {}\n",
                            i + 1,
                            item.headline,
                            item.url,
                            item.source
                        ));
                    }
                }
            }
            FetchOutcome::Unavailable { error } => {
                out.push_str(&format!("_News unavailable: {}_\n", error.message()));
            }
        }

        out.push_str("\n### Analysis\n");
        match &self.insights {
            FetchOutcome::Ok { data } => {
                out.push_str(&data.summary);
                out.push('\n');
            }
            FetchOutcome::Unavailable { error } => {
                out.push_str(&format!("_AI analysis unavailable: {}_\n", error.message()));
            }
        }

        let sources = if self.data_sources.is_empty() {
            "none".to_string()
        } else {
            self.data_sources.join(", ")
        };
        out.push_str(&format!("\n---\n*Sources: {sources}*"));
        out
    }
}
