//! Tool for fetching the latest quote of a symbol

use async_trait::async_trait;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use super::{to_value, validate_ticker};
use crate::api::MarketClients;
use crate::models::PriceSnapshot;

/// Tool for fetching real-time stock performance
pub struct StockPerformanceTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct StockPerformanceParams {
    stock_ticker: String,
}

impl StockPerformanceTool {
    /// Create a new stock performance tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// Fetch the latest quote and derive the day metrics
    pub async fn performance(&self, stock_ticker: &str) -> Result<PriceSnapshot> {
        let symbol = validate_ticker("stock_ticker", stock_ticker)?;
        let client = self.clients.alpha_vantage()?;

        let snapshot = client.get_quote(&symbol).await?.into_snapshot(&symbol)?;
        debug!(symbol = %snapshot.symbol, price = snapshot.price, "Quote fetched");
        Ok(snapshot)
    }
}

#[async_trait]
impl Tool for StockPerformanceTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: StockPerformanceParams = parse_params(params)?;
        to_value(&self.performance(&params.stock_ticker).await?)
    }

    fn name(&self) -> &str {
        "get_stock_performance"
    }

    fn description(&self) -> &str {
        "Fetch real-time stock performance for a ticker: price, change, volume, \
         daily range, and derived metrics."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "stock_ticker": {
                    "type": "string",
                    "description": "Stock symbol (e.g., 'MSFT', 'AAPL')"
                }
            },
            "required": ["stock_ticker"]
        })
    }
}
