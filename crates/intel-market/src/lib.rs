//! Market and company-intelligence tools
//!
//! This crate holds everything behind the tool-invocation boundary:
//!
//! - Upstream clients for Alpha Vantage, NewsAPI, Google News RSS, and Gemini
//! - The request-scoped data model (quotes, news items, insights)
//! - One [`Tool`](intel_core::Tool) handler per exposed tool, keyed by [`ToolKind`]
//! - The briefing orchestrator, which chains the tools into one report
//!
//! # Example
//!
//! ```rust,ignore
//! use intel_market::{IntelConfig, ToolSet};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IntelConfig::from_env()?;
//!     let tools = ToolSet::new(&config)?;
//!
//!     let briefing = tools
//!         .call("generate_company_briefing", json!({"company": "Microsoft"}))
//!         .await?;
//!     println!("{}", briefing["formatted_briefing"].as_str().unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod tools;

#[cfg(test)]
mod test_support;

pub use api::MarketClients;
pub use config::{ApiProvider, Endpoints, IntelConfig, IntelConfigBuilder};
pub use engine::{Briefing, BriefingOrchestrator, FetchOutcome};
pub use error::{MarketError, Result};
pub use models::{
    CompanyInsights, KeyMetrics, NewsItem, PriceMovement, PriceSnapshot, Resolution,
    TickerMatch, TickerQuery, TickerSearch,
};
pub use tools::{Availability, ToolKind, ToolSet};
