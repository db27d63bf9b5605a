//! Command-line interface for client-intel

mod report;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use intel_core::ToolCatalog;
use intel_market::{IntelConfig, ToolSet};
use intel_mcp::{McpServer, ServerInfo};
use intel_utils::{LogFormat, init_tracing, load_dotenv};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

const SERVER_NAME: &str = "client-intel";

const SERVER_INSTRUCTIONS: &str = "Company intelligence tools. Call generate_company_briefing \
     for a full report on a company (name or ticker); the other tools fetch one piece each.";

#[derive(Parser, Debug)]
#[command(name = "client-intel", version)]
#[command(about = "Company intelligence tools for LLM hosts over MCP", long_about = None)]
struct Cli {
    /// Log line format (logs always go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    log_format: LogFormatArg,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,
    /// List the available tools
    Tools,
    /// Invoke one tool and print its JSON result
    Call {
        /// Tool name, e.g. get_stock_performance
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
        /// Print the briefing's Markdown instead of JSON
        #[arg(long)]
        markdown: bool,
    },
    /// Report which API keys are configured and which tools work
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let dotenv = load_dotenv();
    init_tracing(cli.log_format.into(), &cli.log_level);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env");
    }

    let config = IntelConfig::from_env().context("Invalid configuration")?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve => serve(&config).await,
        Commands::Tools => {
            let tools = ToolSet::new(&config)?;
            println!("{}", report::tools_table(&tools, &config));
            Ok(())
        }
        Commands::Call {
            tool,
            args,
            markdown,
        } => call(&config, &tool, &args, markdown).await,
        Commands::Check => {
            println!("{}", report::providers_table(&config));
            println!("{}", report::tools_table(&ToolSet::new(&config)?, &config));
            Ok(())
        }
    }
}

async fn serve(config: &IntelConfig) -> anyhow::Result<()> {
    let tools = Arc::new(ToolSet::new(config)?);
    info!(tools = tools.tools().len(), "Starting client-intel MCP server");

    let server = McpServer::new(
        tools,
        ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION")).with_instructions(SERVER_INSTRUCTIONS),
    );
    server.serve_stdio().await?;
    Ok(())
}

async fn call(config: &IntelConfig, tool: &str, args: &str, markdown: bool) -> anyhow::Result<()> {
    let params = parse_args(args)?;
    let tools = ToolSet::new(config)?;

    match tools.call(tool, params).await {
        Ok(result) => {
            match result.get("formatted_briefing").and_then(Value::as_str) {
                Some(text) if markdown => println!("{text}"),
                _ => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err)?);
            anyhow::bail!("{tool} failed: {err}")
        }
    }
}

fn parse_args(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--args must be valid JSON")?;
    anyhow::ensure!(value.is_object(), "--args must be a JSON object");
    Ok(value)
}
