//! Tool for the Google News RSS search feed

use async_trait::async_trait;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{require_text, to_value};
use crate::api::MarketClients;
use crate::models::{NewsItem, sort_newest_first};

/// Items returned per query
pub const MAX_ARTICLES: usize = 10;

/// Tool for keyless news search via Google News
pub struct GoogleNewsTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct GoogleNewsParams {
    query: String,
}

impl GoogleNewsTool {
    /// Create a new Google News tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// First ten feed items for a query, newest first
    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        let query = require_text("query", query)?;

        let mut items = self.clients.google_news().search(&query).await?;
        items.truncate(MAX_ARTICLES);
        sort_newest_first(&mut items);
        Ok(items)
    }
}

#[async_trait]
impl Tool for GoogleNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: GoogleNewsParams = parse_params(params)?;
        to_value(&self.search(&params.query).await?)
    }

    fn name(&self) -> &str {
        "get_google_news"
    }

    fn description(&self) -> &str {
        "Fetch recent news from the Google News RSS feed for a search query. \
         No API key required. Returns up to 10 articles with headline, source, \
         URL, and publication date."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (e.g., 'Omnicom Group')"
                }
            },
            "required": ["query"]
        })
    }
}
