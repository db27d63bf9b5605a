//! Tool for general news across all NewsAPI sources

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{parse_date, require_text, to_value};
use crate::api::{EverythingQuery, MarketClients};
use crate::models::{NewsItem, sort_newest_first};

const MAX_ARTICLES: usize = 5;
const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Tool for general news about a company from any domain
pub struct GeneralNewsTool {
    clients: Arc<MarketClients>,
}

#[derive(Debug, Deserialize)]
struct GeneralNewsParams {
    company_name: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    sources: Option<String>,
}

impl GeneralNewsTool {
    /// Create a new general news tool
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self { clients }
    }

    /// Articles published since `from` (default: 30 days ago), newest first
    pub async fn news(
        &self,
        company_name: &str,
        from: Option<NaiveDate>,
        sources: Option<&str>,
    ) -> Result<Vec<NewsItem>> {
        let query = require_text("company_name", company_name)?;
        let client = self.clients.news_api()?;

        let from = from.unwrap_or_else(default_from);
        let mut request = EverythingQuery::new(query)
            .from_date(from)
            .page_size(MAX_ARTICLES as u32);
        if let Some(sources) = sources.map(str::trim).filter(|s| !s.is_empty()) {
            request = request.sources(sources);
        }

        let mut items = client.everything(&request).await?;
        items.truncate(MAX_ARTICLES);
        sort_newest_first(&mut items);
        Ok(items)
    }
}

fn default_from() -> NaiveDate {
    (Utc::now() - Duration::days(DEFAULT_LOOKBACK_DAYS)).date_naive()
}

#[async_trait]
impl Tool for GeneralNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: GeneralNewsParams = parse_params(params)?;
        let from = params
            .from
            .as_deref()
            .map(|d| parse_date("from", d))
            .transpose()?;

        let items = self
            .news(&params.company_name, from, params.sources.as_deref())
            .await?;
        to_value(&items)
    }

    fn name(&self) -> &str {
        "get_general_news"
    }

    fn description(&self) -> &str {
        "Get recent general news about a company from all sources. \
         Returns up to 5 articles with headline, source, and URL."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Company name (e.g., 'Apple')"
                },
                "from": {
                    "type": "string",
                    "description": "Oldest publication date, YYYY-MM-DD (default: 30 days ago)"
                },
                "sources": {
                    "type": "string",
                    "description": "Comma-separated NewsAPI source ids (e.g., 'bbc-news,the-verge')"
                }
            },
            "required": ["company_name"]
        })
    }
}
