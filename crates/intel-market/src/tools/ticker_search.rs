//! Tool for resolving a company name to a ticker symbol

use async_trait::async_trait;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::{require_text, to_value};
use crate::api::MarketClients;
use crate::models::{TickerMatch, TickerSearch};

const MAX_SUGGESTIONS: usize = 5;

/// Tool for searching ticker symbols by company name
pub struct TickerSearchTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct TickerSearchParams {
    company_name: String,
}

impl TickerSearchTool {
    /// Create a new ticker search tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// Search for a company's ticker
    ///
    /// An empty match list is a successful result with `found = false`.
    pub async fn search(&self, company_name: &str) -> Result<TickerSearch> {
        let query = require_text("company_name", company_name)?;
        let client = self.clients.alpha_vantage()?;

        let matches: Vec<TickerMatch> = client
            .search_symbol(&query)
            .await?
            .into_iter()
            .map(TickerMatch::from)
            .collect();

        let Some(best) = matches.first().cloned() else {
            info!(query = %query, "No ticker found");
            return Ok(TickerSearch {
                found: false,
                message: format!("No ticker found for '{query}'."),
                query,
                best_match: None,
                suggestions: Vec::new(),
            });
        };

        info!(query = %query, ticker = %best.ticker, "Ticker resolved");
        Ok(TickerSearch {
            found: true,
            message: format!("Found ticker '{}' for '{}'", best.ticker, best.name),
            query,
            suggestions: matches.into_iter().take(MAX_SUGGESTIONS).collect(),
            best_match: Some(best),
        })
    }
}

#[async_trait]
impl Tool for TickerSearchTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: TickerSearchParams = parse_params(params)?;
        to_value(&self.search(&params.company_name).await?)
    }

    fn name(&self) -> &str {
        "search_ticker_symbol"
    }

    fn description(&self) -> &str {
        "Search for a company's stock ticker symbol by name. \
         Returns the best match plus up to 5 alternative suggestions."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Company name to look up (e.g., 'Microsoft', 'Apple')"
                }
            },
            "required": ["company_name"]
        })
    }
}
