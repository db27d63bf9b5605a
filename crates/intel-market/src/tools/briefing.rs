//! Tool wrapping the briefing orchestrator

use async_trait::async_trait;
use intel_core::{Result, Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};

use super::to_value;
use crate::engine::BriefingOrchestrator;

/// Tool for a full company briefing
pub struct BriefingTool {
    orchestrator: BriefingOrchestrator,
}

#[derive(Debug, Deserialize)]
struct BriefingParams {
    #[serde(alias = "company_name")]
    company: String,
    #[serde(default)]
    stock_ticker: Option<String>,
}

impl BriefingTool {
    pub fn new(orchestrator: BriefingOrchestrator) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl Tool for BriefingTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: BriefingParams = parse_params(params)?;
        let briefing = self
            .orchestrator
            .brief(&params.company, params.stock_ticker.as_deref())
            .await?;
        to_value(&briefing)
    }

    fn name(&self) -> &str {
        "generate_company_briefing"
    }

    fn description(&self) -> &str {
        "Generate a company intelligence briefing: resolves the ticker, then gathers \
         stock performance, recent news, and an AI analysis into one report. \
         Sections that cannot be fetched are marked unavailable instead of failing \
         the whole briefing."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Company name or ticker symbol (e.g., 'Microsoft' or 'MSFT')"
                },
                "stock_ticker": {
                    "type": "string",
                    "description": "Ticker to use instead of searching for one (optional)"
                }
            },
            "required": ["company"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{clients, config_for, quote_body, rss_body};
    use httpmock::{Method::GET, MockServer};
    use intel_core::ErrorKind;

    #[tokio::test]
    async fn test_briefing_wire_shape() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "GLOBAL_QUOTE");
            then.status(200).json_body(quote_body("AAPL", 230.0, -1.5));
        });
        server.mock(|when, then| {
            when.method(GET).path("/rss/search");
            then.status(200).body(rss_body(&[(
                "Apple ships new iPhone",
                "The Verge",
                "Tue, 07 Oct 2025 14:05:00 GMT",
            )]));
        });

        let tool = BriefingTool::new(BriefingOrchestrator::new(clients(
            config_for(&server).alpha_vantage_api_key("av_key"),
        )));
        let result = tool
            .execute(json!({"company_name": "Apple", "stock_ticker": "AAPL"}))
            .await
            .unwrap();

        assert_eq!(result["company"], "Apple");
        assert_eq!(result["ticker"]["symbol"], "AAPL");
        assert_eq!(result["ticker"]["resolution"], "explicit");
        assert_eq!(result["stock_performance"]["status"], "ok");
        assert_eq!(result["stock_performance"]["data"]["price"], 230.0);
        assert_eq!(result["news"]["status"], "ok");
        assert_eq!(result["insights"]["status"], "unavailable");
        assert_eq!(result["insights"]["error"]["kind"], "Unconfigured");
        assert!(result["formatted_briefing"].as_str().unwrap().contains("Apple ships new iPhone"));
    }

    #[tokio::test]
    async fn test_blank_company_is_invalid_input() {
        let server = MockServer::start();
        let tool = BriefingTool::new(BriefingOrchestrator::new(clients(config_for(&server))));

        let err = tool.execute(json!({"company": " "})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
