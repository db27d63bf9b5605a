//! Print a company briefing
//!
//! ```bash
//! export ALPHA_VANTAGE_API_KEY=your_key_here
//! export NEWS_API_KEY=your_key_here    # Optional, Google News is used without it
//! export GEMINI_API_KEY=your_key_here  # Optional, insights are skipped without it
//!
//! cargo run --example company_briefing -p intel-market Microsoft
//! ```

use intel_market::{BriefingOrchestrator, IntelConfig, MarketClients};
use intel_utils::{LogFormat, init_tracing, load_dotenv};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing(LogFormat::Text, "info,intel_market=debug");

    let company = std::env::args().nth(1).unwrap_or_else(|| "Microsoft".to_string());

    let config = IntelConfig::from_env()?;
    let clients = Arc::new(MarketClients::from_config(&config)?);
    let briefing = BriefingOrchestrator::new(clients).brief(&company, None).await?;

    println!("{}", briefing.formatted_briefing);
    println!("Generated at {}", briefing.generated_at);
    Ok(())
}
