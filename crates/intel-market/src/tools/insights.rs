//! Tool for an AI-written analysis of price action and headlines

use async_trait::async_trait;
use chrono::Utc;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::{require_text, to_value};
use crate::api::MarketClients;
use crate::models::{CompanyInsights, KeyMetrics, NewsItem, PriceSnapshot};

/// Headlines included in the prompt
const PROMPT_HEADLINES: usize = 5;

/// Tool for summarizing a company's stock and news with Gemini
pub struct InsightsTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct InsightsParams {
    company_name: String,
    stock_data: PriceSnapshot,
    #[serde(default)]
    news_articles: Vec<NewsItem>,
}

impl InsightsTool {
    /// Create a new insights tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// Ask the model for a short, recommendation-free analysis
    pub async fn summarize(
        &self,
        company_name: &str,
        stock: &PriceSnapshot,
        news: &[NewsItem],
    ) -> Result<CompanyInsights> {
        let company = require_text("company_name", company_name)?;
        let client = self.clients.gemini()?;

        let summary = client.generate(&build_prompt(&company, stock, news)).await?;
        info!(company = %company, symbol = %stock.symbol, "Insights generated");

        Ok(CompanyInsights {
            summary,
            stock_symbol: if stock.symbol.is_empty() {
                "N/A".to_string()
            } else {
                stock.symbol.clone()
            },
            company,
            current_price: stock.price,
            change_percent: stock.change_percent,
            analysis_timestamp: Utc::now(),
            news_count: news.len(),
            key_metrics: KeyMetrics {
                price_movement: stock.movement(),
                volume_millions: stock.volume_millions,
                volatility: stock.day_range_percent,
            },
        })
    }
}

/// Analyst prompt over the snapshot and the first few headlines
pub(crate) fn build_prompt(company: &str, stock: &PriceSnapshot, news: &[NewsItem]) -> String {
    let symbol = if stock.symbol.is_empty() {
        "N/A"
    } else {
        stock.symbol.as_str()
    };
    let trading_day = if stock.latest_trading_day.is_empty() {
        "N/A"
    } else {
        stock.latest_trading_day.as_str()
    };

    let mut prompt = format!(
        "You are a financial analyst. Analyze the following data for {company}:\n\n\
         STOCK PERFORMANCE:\n\
         Stock: {symbol}\n\
         Price: ${:.2}\n\
         Change: {:+.2}%\n\
         Day Range: ${:.2} - ${:.2}\n\
         Volume: {:.2}M shares\n\
         Trading Day: {trading_day}\n\n\
         RECENT NEWS:\n",
        stock.price, stock.change_percent, stock.low, stock.high, stock.volume_millions,
    );

    if news.is_empty() {
        prompt.push_str("- No recent headlines available\n");
    }
    for item in news.iter().take(PROMPT_HEADLINES) {
        prompt.push_str(&format!("- {} ({})\n", item.headline, item.source));
    }

    prompt.push_str(
        "\nProvide a concise 3-4 sentence analysis covering:\n\
         1. Current stock performance and trading activity\n\
         2. Key themes from recent news\n\
         3. Brief outlook or considerations for investors\n\n\
         Be professional, factual, and balanced. No buy/sell recommendations.",
    );
    prompt
}

#[async_trait]
impl Tool for InsightsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: InsightsParams = parse_params(params)?;
        let insights = self
            .summarize(&params.company_name, &params.stock_data, &params.news_articles)
            .await?;
        to_value(&insights)
    }

    fn name(&self) -> &str {
        "summarize_company_insights"
    }

    fn description(&self) -> &str {
        "Generate an AI-written analysis of a company's stock performance and recent \
         news. Pass the output of get_stock_performance and a list of news articles."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Company being analyzed"
                },
                "stock_data": {
                    "type": "object",
                    "description": "Stock performance record as returned by get_stock_performance"
                },
                "news_articles": {
                    "type": "array",
                    "description": "Articles with headline (or title), source, and url",
                    "items": { "type": "object" }
                }
            },
            "required": ["company_name", "stock_data"]
        })
    }
}
