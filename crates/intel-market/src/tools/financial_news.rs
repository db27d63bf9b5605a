//! Tool for financial news from major business outlets

use async_trait::async_trait;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{require_text, to_value};
use crate::api::news_api::FINANCIAL_DOMAINS;
use crate::api::{EverythingQuery, MarketClients};
use crate::models::{NewsItem, sort_newest_first};

const MAX_ARTICLES: usize = 5;

/// Tool for news from Reuters, Bloomberg, WSJ, FT, and CNBC
pub struct FinancialNewsTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct FinancialNewsParams {
    company_name: String,
}

impl FinancialNewsTool {
    /// Create a new financial news tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// Latest articles about a company, newest first
    pub async fn news(&self, company_name: &str) -> Result<Vec<NewsItem>> {
        let query = require_text("company_name", company_name)?;
        let client = self.clients.news_api()?;

        let request = EverythingQuery::new(query)
            .domains(FINANCIAL_DOMAINS)
            .page_size(MAX_ARTICLES as u32);
        let mut items = client.everything(&request).await?;

        items.truncate(MAX_ARTICLES);
        sort_newest_first(&mut items);
        Ok(items)
    }
}

#[async_trait]
impl Tool for FinancialNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: FinancialNewsParams = parse_params(params)?;
        to_value(&self.news(&params.company_name).await?)
    }

    fn name(&self) -> &str {
        "get_financial_news"
    }

    fn description(&self) -> &str {
        "Get the latest financial news about a company from Reuters, Bloomberg, \
         WSJ, FT, and CNBC. Returns up to 5 articles with headline, source, and URL."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Company name (e.g., 'Microsoft')"
                }
            },
            "required": ["company_name"]
        })
    }
}
