//! Tool handlers exposed to the host model
//!
//! The set is closed: every tool is a [`ToolKind`] variant, and [`ToolSet`]
//! binds each variant to exactly one handler.

pub mod briefing;
pub mod financial_news;
pub mod general_news;
pub mod google_news;
pub mod insights;
pub mod stock_performance;
pub mod ticker_search;

pub use briefing::BriefingTool;
pub use financial_news::FinancialNewsTool;
pub use general_news::GeneralNewsTool;
pub use google_news::GoogleNewsTool;
pub use insights::InsightsTool;
pub use stock_performance::StockPerformanceTool;
pub use ticker_search::TickerSearchTool;

use crate::api::MarketClients;
use crate::config::{ApiProvider, IntelConfig};
use crate::engine::BriefingOrchestrator;
use crate::error::Result as MarketResult;
use chrono::NaiveDate;
use intel_core::{Result, Tool, ToolCatalog, ToolError};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// Every tool the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolKind {
    SearchTickerSymbol,
    GetStockPerformance,
    GetFinancialNews,
    GetGeneralNews,
    GetGoogleNews,
    SummarizeCompanyInsights,
    GenerateCompanyBriefing,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        Self::SearchTickerSymbol,
        Self::GetStockPerformance,
        Self::GetFinancialNews,
        Self::GetGeneralNews,
        Self::GetGoogleNews,
        Self::SummarizeCompanyInsights,
        Self::GenerateCompanyBriefing,
    ];

    /// Wire name used in `tools/list` and `tools/call`
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchTickerSymbol => "search_ticker_symbol",
            Self::GetStockPerformance => "get_stock_performance",
            Self::GetFinancialNews => "get_financial_news",
            Self::GetGeneralNews => "get_general_news",
            Self::GetGoogleNews => "get_google_news",
            Self::SummarizeCompanyInsights => "summarize_company_insights",
            Self::GenerateCompanyBriefing => "generate_company_briefing",
        }
    }

    /// Providers whose keys the tool cannot work without
    pub fn required_providers(self) -> &'static [ApiProvider] {
        match self {
            Self::SearchTickerSymbol | Self::GetStockPerformance => &[ApiProvider::AlphaVantage],
            Self::GetFinancialNews | Self::GetGeneralNews => &[ApiProvider::NewsApi],
            Self::GetGoogleNews | Self::GenerateCompanyBriefing => &[],
            Self::SummarizeCompanyInsights => &[ApiProvider::Gemini],
        }
    }

    /// Providers whose absence only blanks part of the result
    ///
    /// Without Alpha Vantage a briefing still works for symbol input, with
    /// the price marked unavailable and news from Google.
    pub fn optional_providers(self) -> &'static [ApiProvider] {
        match self {
            Self::GenerateCompanyBriefing => &[
                ApiProvider::AlphaVantage,
                ApiProvider::NewsApi,
                ApiProvider::Gemini,
            ],
            _ => &[],
        }
    }

    /// How well the tool works with the keys at hand
    pub fn availability(self, config: &IntelConfig) -> Availability {
        let missing = |providers: &[ApiProvider]| -> Vec<ApiProvider> {
            providers
                .iter()
                .copied()
                .filter(|p| !config.is_configured(*p))
                .collect()
        };

        let required = missing(self.required_providers());
        if !required.is_empty() {
            return Availability::Unavailable(required);
        }
        let optional = missing(self.optional_providers());
        if optional.is_empty() {
            Availability::Ready
        } else {
            Availability::Degraded(optional)
        }
    }

    /// Whether every required key is present
    pub fn is_available(self, config: &IntelConfig) -> bool {
        !matches!(self.availability(config), Availability::Unavailable(_))
    }
}

/// Result of [`ToolKind::availability`], listing the providers lacking a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    Degraded(Vec<ApiProvider>),
    Unavailable(Vec<ApiProvider>),
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ToolError::not_found(format!("Unknown tool: {s}")))
    }
}

/// Registry binding each [`ToolKind`] to its handler
pub struct ToolSet {
    tools: BTreeMap<ToolKind, Arc<dyn Tool>>,
}

impl ToolSet {
    /// Build every handler from configuration
    pub fn new(config: &IntelConfig) -> MarketResult<Self> {
        let clients = Arc::new(MarketClients::from_config(config)?);
        Ok(Self::from_clients(clients))
    }

    /// Build every handler on top of existing clients
    pub fn from_clients(clients: Arc<MarketClients>) -> Self {
        let mut tools: BTreeMap<ToolKind, Arc<dyn Tool>> = BTreeMap::new();

        for kind in ToolKind::ALL {
            let tool: Arc<dyn Tool> = match kind {
                ToolKind::SearchTickerSymbol => Arc::new(TickerSearchTool::new(clients.clone())),
                ToolKind::GetStockPerformance => {
                    Arc::new(StockPerformanceTool::new(clients.clone()))
                }
                ToolKind::GetFinancialNews => Arc::new(FinancialNewsTool::new(clients.clone())),
                ToolKind::GetGeneralNews => Arc::new(GeneralNewsTool::new(clients.clone())),
                ToolKind::GetGoogleNews => Arc::new(GoogleNewsTool::new(clients.clone())),
                ToolKind::SummarizeCompanyInsights => {
                    Arc::new(InsightsTool::new(clients.clone()))
                }
                ToolKind::GenerateCompanyBriefing => Arc::new(BriefingTool::new(
                    BriefingOrchestrator::new(clients.clone()),
                )),
            };
            tools.insert(kind, tool);
        }

        Self { tools }
    }

    /// Handler for one tool
    pub fn get(&self, kind: ToolKind) -> Option<Arc<dyn Tool>> {
        self.tools.get(&kind).cloned()
    }

    /// Invoke a tool by wire name
    pub async fn call(&self, name: &str, params: Value) -> Result<Value> {
        let kind: ToolKind = name.parse()?;
        let tool = self
            .get(kind)
            .ok_or_else(|| ToolError::not_found(format!("Unknown tool: {name}")))?;
        tool.execute(params).await
    }
}

impl ToolCatalog for ToolSet {
    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>> {
        name.parse::<ToolKind>().ok().and_then(|kind| self.get(kind))
    }
}

static TICKER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]{1,10}$").ok());

/// Trimmed, non-blank string parameter
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_input(format!("'{field}' must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Ticker parameter, upper-cased
pub(crate) fn validate_ticker(field: &str, value: &str) -> Result<String> {
    let ticker = require_text(field, value)?;
    let valid = TICKER_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(&ticker));
    if !valid {
        return Err(ToolError::invalid_input(format!(
            "'{field}' must be 1-10 letters, digits, '.' or '-', got '{ticker}'"
        )));
    }
    Ok(ticker.to_uppercase())
}

/// `YYYY-MM-DD` date parameter
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::invalid_input(format!("'{field}' must be a YYYY-MM-DD date, got '{value}'"))
    })
}

/// Serialize a tool result
pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::upstream(format!("Failed to encode result: {e}")))
}
