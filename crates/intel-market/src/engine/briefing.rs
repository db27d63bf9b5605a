//! Briefing orchestration
//!
//! Resolve the ticker, then fetch price, news, and an AI summary in sequence.
//! Only resolution can fail the whole briefing; every later step records an
//! unavailable outcome and the pipeline moves on.

use intel_core::{ErrorKind, Result, ToolError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument, warn};

use super::result::{Briefing, FetchOutcome};
use crate::api::MarketClients;
use crate::config::ApiProvider;
use crate::models::{NewsItem, Resolution, TickerQuery, sort_newest_first};
use crate::tools::{
    FinancialNewsTool, GeneralNewsTool, GoogleNewsTool, InsightsTool, StockPerformanceTool,
    TickerSearchTool, require_text, validate_ticker,
};

/// Articles kept in a briefing
pub const MAX_BRIEFING_ARTICLES: usize = 10;

/// Characters of a headline compared when merging feeds
const TITLE_PREFIX_CHARS: usize = 60;

static SYMBOL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,5}(\.[A-Z]{1,2})?$").ok());

/// Whether the input is already a ticker (`MSFT`, `BRK.B`) rather than a name
pub fn looks_like_symbol(input: &str) -> bool {
    SYMBOL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(input))
}

/// Builds a [`Briefing`] from the individual tools
pub struct BriefingOrchestrator {
    clients: Arc<MarketClients>,
    ticker_search: TickerSearchTool,
    stock: StockPerformanceTool,
    financial_news: FinancialNewsTool,
    google_news: GoogleNewsTool,
    general_news: GeneralNewsTool,
    insights: InsightsTool,
}

impl BriefingOrchestrator {
    pub fn new(clients: Arc<MarketClients>) -> Self {
        Self {
            ticker_search: TickerSearchTool::new(clients.clone()),
            stock: StockPerformanceTool::new(clients.clone()),
            financial_news: FinancialNewsTool::new(clients.clone()),
            google_news: GoogleNewsTool::new(clients.clone()),
            general_news: GeneralNewsTool::new(clients.clone()),
            insights: InsightsTool::new(clients.clone()),
            clients,
        }
    }

    /// Produce a briefing for a company name or symbol
    ///
    /// Fails only when the company cannot be resolved to a symbol; nothing
    /// else is fetched in that case.
    #[instrument(skip(self))]
    pub async fn brief(&self, company: &str, stock_ticker: Option<&str>) -> Result<Briefing> {
        let company = require_text("company", company)?;
        let mut ticker = self.resolve(&company, stock_ticker).await?;
        let mut price = FetchOutcome::from_result(self.stock.performance(&ticker.symbol).await);

        // "APPLE" matches the symbol pattern but is a name; an unknown quote
        // sends it through search after all
        let quote_missing = price
            .error()
            .is_some_and(|err| err.kind() == ErrorKind::NotFound);
        if ticker.resolution == Resolution::Symbol && quote_missing {
            match self.search(&company).await {
                Ok(found) if found.symbol != ticker.symbol => {
                    ticker = found;
                    price =
                        FetchOutcome::from_result(self.stock.performance(&ticker.symbol).await);
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(company = %company, error = %err, "No ticker behind symbol-like input");
                }
            }
        }

        let mut sources = Vec::new();
        if ticker.resolution == Resolution::Search {
            add_source(&mut sources, ApiProvider::AlphaVantage);
        }
        match price.error() {
            None => add_source(&mut sources, ApiProvider::AlphaVantage),
            Some(err) => warn!(symbol = %ticker.symbol, error = %err, "Price unavailable"),
        }

        let news = self.gather_news(&company, &ticker.symbol, &mut sources).await;

        let insights = match (price.data(), self.clients.gemini()) {
            (_, Err(err)) => FetchOutcome::unavailable(err.into()),
            (Some(snapshot), Ok(_)) => {
                let headlines = news.data().map_or(&[][..], Vec::as_slice);
                let outcome = FetchOutcome::from_result(
                    self.insights.summarize(&company, snapshot, headlines).await,
                );
                match outcome.error() {
                    None => add_source(&mut sources, ApiProvider::Gemini),
                    Some(err) => warn!(error = %err, "Insights unavailable"),
                }
                outcome
            }
            (None, Ok(_)) => FetchOutcome::unavailable(ToolError::upstream(
                "insights skipped: stock performance unavailable",
            )),
        };

        info!(
            symbol = %ticker.symbol,
            price_ok = price.is_ok(),
            news_ok = news.is_ok(),
            insights_ok = insights.is_ok(),
            "Briefing assembled"
        );

        Ok(Briefing::new(company, ticker, price, news, insights, sources))
    }

    /// Turn the caller's input into a symbol
    async fn resolve(&self, company: &str, stock_ticker: Option<&str>) -> Result<TickerQuery> {
        if let Some(explicit) = stock_ticker.filter(|t| !t.trim().is_empty()) {
            return Ok(TickerQuery {
                query: company.to_string(),
                symbol: validate_ticker("stock_ticker", explicit)?,
                company_name: None,
                exchange: None,
                resolution: Resolution::Explicit,
            });
        }

        if looks_like_symbol(company) {
            return Ok(TickerQuery {
                query: company.to_string(),
                symbol: company.to_string(),
                company_name: None,
                exchange: None,
                resolution: Resolution::Symbol,
            });
        }

        self.search(company).await
    }

    /// Resolve through ticker search; any failure other than a missing key
    /// is `NotFound`
    async fn search(&self, company: &str) -> Result<TickerQuery> {
        let search = match self.ticker_search.search(company).await {
            Ok(search) => search,
            Err(err) if err.kind() == ErrorKind::Unconfigured => return Err(err),
            Err(err) => {
                warn!(company, error = %err, "Ticker search failed");
                return Err(ToolError::not_found(format!(
                    "Could not resolve '{company}' to a ticker: {}",
                    err.message()
                )));
            }
        };

        let best = search
            .best_match
            .ok_or_else(|| ToolError::not_found(search.message))?;

        info!(company, symbol = %best.ticker, "Resolved company to ticker");
        Ok(TickerQuery {
            query: company.to_string(),
            symbol: best.ticker,
            company_name: Some(best.name),
            exchange: Some(best.region).filter(|r| !r.is_empty()),
            resolution: Resolution::Search,
        })
    }

    /// Financial news merged with Google News, general news if both are empty
    ///
    /// The outcome is unavailable only when every consulted source failed.
    async fn gather_news(
        &self,
        company: &str,
        symbol: &str,
        sources: &mut Vec<String>,
    ) -> FetchOutcome<Vec<NewsItem>> {
        let mut first_error: Option<ToolError> = None;
        let mut any_answered = false;
        let mut news: Vec<NewsItem> = Vec::new();

        match self.financial_news.news(company).await {
            Ok(items) => {
                any_answered = true;
                if !items.is_empty() {
                    add_source(sources, ApiProvider::NewsApi);
                }
                merge_by_title(&mut news, items);
            }
            Err(err) => {
                warn!(error = %err, "Financial news unavailable");
                first_error.get_or_insert(err);
            }
        }

        let query = if company.eq_ignore_ascii_case(symbol) {
            symbol.to_string()
        } else {
            format!("{company} {symbol}")
        };
        match self.google_news.search(&query).await {
            Ok(items) => {
                any_answered = true;
                if !items.is_empty() {
                    add_source(sources, ApiProvider::GoogleNews);
                }
                merge_by_title(&mut news, items);
            }
            Err(err) => {
                warn!(error = %err, "Google News unavailable");
                first_error.get_or_insert(err);
            }
        }

        if news.is_empty() {
            match self.general_news.news(company, None, None).await {
                Ok(items) => {
                    any_answered = true;
                    if !items.is_empty() {
                        add_source(sources, ApiProvider::NewsApi);
                    }
                    merge_by_title(&mut news, items);
                }
                Err(err) => {
                    warn!(error = %err, "General news unavailable");
                    first_error.get_or_insert(err);
                }
            }
        }

        if !any_answered {
            return FetchOutcome::unavailable(
                first_error.unwrap_or_else(|| ToolError::upstream("no news source answered")),
            );
        }

        sort_newest_first(&mut news);
        news.truncate(MAX_BRIEFING_ARTICLES);
        FetchOutcome::ok(news)
    }
}

fn add_source(sources: &mut Vec<String>, provider: ApiProvider) {
    let name = provider.display_name();
    if !sources.iter().any(|s| s == name) {
        sources.push(name.to_string());
    }
}

fn title_key(headline: &str) -> String {
    headline
        .chars()
        .take(TITLE_PREFIX_CHARS)
        .collect::<String>()
        .to_lowercase()
}

/// Append items whose headline prefix is not already present
fn merge_by_title(news: &mut Vec<NewsItem>, incoming: Vec<NewsItem>) {
    let mut seen: HashSet<String> = news.iter().map(|n| title_key(&n.headline)).collect();
    for item in incoming {
        if seen.insert(title_key(&item.headline)) {
            news.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::news_api::FINANCIAL_DOMAINS;
    use crate::test_support::{
        clients, config_for, configured, gemini_body, news_body, quote_body, rss_body,
        search_body,
    };
    use httpmock::{Method::GET, Method::POST, Mock, MockServer};
    use serde_json::json;

    fn search_mock<'a>(server: &'a MockServer, matches: &[(&str, &str)]) -> Mock<'a> {
        let body = search_body(matches);
        server.mock(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "SYMBOL_SEARCH");
            then.status(200).json_body(body);
        })
    }

    fn quote_mock<'a>(server: &'a MockServer, symbol: &str) -> Mock<'a> {
        let body = quote_body(symbol, 414.1, 5.1);
        let symbol = symbol.to_string();
        server.mock(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "GLOBAL_QUOTE")
                .query_param("symbol", symbol);
            then.status(200).json_body(body);
        })
    }

    fn financial_mock<'a>(server: &'a MockServer, articles: &[(&str, &str, &str)]) -> Mock<'a> {
        let body = news_body(articles);
        server.mock(|when, then| {
            when.method(GET)
                .path("/v2/everything")
                .query_param("domains", FINANCIAL_DOMAINS);
            then.status(200).json_body(body);
        })
    }

    fn general_mock<'a>(server: &'a MockServer, articles: &[(&str, &str, &str)]) -> Mock<'a> {
        let body = news_body(articles);
        server.mock(|when, then| {
            when.method(GET)
                .path("/v2/everything")
                .query_param_exists("from");
            then.status(200).json_body(body);
        })
    }

    fn google_mock<'a>(server: &'a MockServer, items: &[(&str, &str, &str)]) -> Mock<'a> {
        let body = rss_body(items);
        server.mock(|when, then| {
            when.method(GET).path("/rss/search");
            then.status(200).body(body);
        })
    }

    fn gemini_mock(server: &MockServer) -> Mock<'_> {
        server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200)
                .json_body(gemini_body("Microsoft rose on cloud demand."));
        })
    }

    fn failing<'a>(server: &'a MockServer, path: &str, status: u16) -> Mock<'a> {
        let path = path.to_string();
        server.mock(|when, then| {
            when.path(path);
            then.status(status).body("upstream down");
        })
    }

    #[test]
    fn test_looks_like_symbol() {
        assert!(looks_like_symbol("MSFT"));
        assert!(looks_like_symbol("BRK.B"));
        assert!(looks_like_symbol("F"));
        assert!(!looks_like_symbol("Microsoft"));
        assert!(!looks_like_symbol("msft"));
        assert!(!looks_like_symbol("GOOGLE"));
        assert!(!looks_like_symbol("NotARealCompany123"));
    }

    #[test]
    fn test_merge_by_title_prefix() {
        let item = |headline: &str| NewsItem {
            headline: headline.to_string(),
            source: "X".to_string(),
            published_at: None,
            url: String::new(),
        };
        let long = "Microsoft unveils new AI chips for Azure data centers in a push to cut costs";

        let mut news = vec![item(long)];
        merge_by_title(
            &mut news,
            vec![
                item(&long.to_uppercase()),
                item(&format!("{long} - Reuters")),
                item("Different story"),
                item("different STORY"),
            ],
        );

        assert_eq!(news.len(), 2);
        assert_eq!(news[1].headline, "Different story");
    }

    #[tokio::test]
    async fn test_company_name_resolves_to_full_briefing() {
        let server = MockServer::start();
        let search = search_mock(&server, &[("MSFT", "Microsoft Corporation")]);
        let quote = quote_mock(&server, "MSFT");
        let financial = financial_mock(
            &server,
            &[
                ("Microsoft beats estimates", "Reuters", "2025-10-08T12:00:00Z"),
                ("Azure growth accelerates", "CNBC", "2025-10-09T12:00:00Z"),
            ],
        );
        let google = google_mock(&server, &[]);
        let gemini = gemini_mock(&server);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let briefing = orchestrator.brief("Microsoft", None).await.unwrap();

        search.assert();
        quote.assert();
        financial.assert();
        gemini.assert();
        google.assert();

        assert_eq!(briefing.ticker.symbol, "MSFT");
        assert_eq!(briefing.ticker.resolution, Resolution::Search);
        assert_eq!(
            briefing.ticker.company_name.as_deref(),
            Some("Microsoft Corporation")
        );
        assert_eq!(briefing.stock_performance.data().unwrap().price, 414.1);

        let news = briefing.news.data().unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].headline, "Azure growth accelerates");

        let insights = briefing.insights.data().unwrap();
        assert_eq!(insights.summary, "Microsoft rose on cloud demand.");
        assert_eq!(insights.news_count, 2);

        assert_eq!(briefing.data_sources, ["Alpha Vantage", "NewsAPI", "Gemini"]);
        assert!(
            briefing
                .formatted_briefing
                .starts_with("## Microsoft (MSFT) - Company Briefing")
        );
    }

    #[tokio::test]
    async fn test_unresolvable_company_stops_before_fetching() {
        let server = MockServer::start();
        let search = search_mock(&server, &[]);
        let quote = quote_mock(&server, "NOTAREAL");
        let financial = financial_mock(&server, &[("x", "y", "2025-10-01T00:00:00Z")]);
        let google = google_mock(&server, &[]);
        let gemini = gemini_mock(&server);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let err = orchestrator
            .brief("NotARealCompany123", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        search.assert();
        quote.assert_hits(0);
        financial.assert_hits(0);
        google.assert_hits(0);
        gemini.assert_hits(0);
    }

    #[tokio::test]
    async fn test_search_failure_is_not_found() {
        let server = MockServer::start();
        let search = failing(&server, "/query", 500);
        let financial = financial_mock(&server, &[]);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let err = orchestrator.brief("Microsoft", None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.message().contains("Microsoft"));
        search.assert_hits(1);
        financial.assert_hits(0);
    }

    #[tokio::test]
    async fn test_missing_alpha_vantage_key_is_unconfigured() {
        let server = MockServer::start();
        let search = search_mock(&server, &[("MSFT", "Microsoft Corporation")]);

        let orchestrator =
            BriefingOrchestrator::new(clients(config_for(&server).news_api_key("news_key")));
        let err = orchestrator.brief("Microsoft", None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unconfigured);
        search.assert_hits(0);
    }

    #[tokio::test]
    async fn test_price_failure_keeps_news() {
        let server = MockServer::start();
        let quote = failing(&server, "/query", 503);
        let financial = financial_mock(
            &server,
            &[("Microsoft beats estimates", "Reuters", "2025-10-08T12:00:00Z")],
        );
        let gemini = gemini_mock(&server);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let briefing = orchestrator.brief("Microsoft", Some("msft")).await.unwrap();

        quote.assert_hits(1);
        financial.assert();
        gemini.assert_hits(0);

        assert_eq!(briefing.ticker.symbol, "MSFT");
        assert_eq!(briefing.ticker.resolution, Resolution::Explicit);
        assert_eq!(
            briefing.stock_performance.error().unwrap().kind(),
            ErrorKind::UpstreamUnavailable
        );
        assert_eq!(briefing.news.data().unwrap().len(), 1);
        assert!(
            briefing
                .insights
                .error()
                .unwrap()
                .message()
                .contains("stock performance unavailable")
        );
        assert_eq!(briefing.data_sources, ["NewsAPI"]);
    }

    #[tokio::test]
    async fn test_news_failure_keeps_price() {
        let server = MockServer::start();
        let quote = quote_mock(&server, "MSFT");
        let news = failing(&server, "/v2/everything", 500);
        let google = failing(&server, "/rss/search", 503);
        let gemini = gemini_mock(&server);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let briefing = orchestrator.brief("MSFT", None).await.unwrap();

        quote.assert();
        news.assert_hits(2);
        google.assert_hits(1);
        gemini.assert();

        assert!(briefing.stock_performance.is_ok());
        let err = briefing.news.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(err.message().contains("NewsAPI"));
        assert_eq!(briefing.insights.data().unwrap().news_count, 0);
    }

    #[tokio::test]
    async fn test_symbol_input_skips_search() {
        let server = MockServer::start();
        let search = search_mock(&server, &[("MSFT", "Microsoft Corporation")]);
        let quote = quote_mock(&server, "MSFT");
        financial_mock(&server, &[("Headline", "Reuters", "2025-10-08T12:00:00Z")]);
        gemini_mock(&server);

        let orchestrator = BriefingOrchestrator::new(clients(configured(&server)));
        let briefing = orchestrator.brief("MSFT", None).await.unwrap();

        search.assert_hits(0);
        quote.assert();
        assert_eq!(briefing.ticker.resolution, Resolution::Symbol);
        assert_eq!(briefing.data_sources, ["Alpha Vantage", "NewsAPI", "Gemini"]);
    }

    #[tokio::test]
    async fn test_google_news_merges_with_financial_news() {
        let server = MockServer::start();
        quote_mock(&server, "MSFT");
        let financial = financial_mock(
            &server,
            &[("Microsoft beats estimates on cloud", "Reuters", "2025-10-08T12:00:00Z")],
        );
        let google = server.mock(|when, then| {
            when.method(GET)
                .path("/rss/search")
                .query_param("q", "Microsoft MSFT");
            then.status(200).body(rss_body(&[
                ("MICROSOFT BEATS ESTIMATES ON CLOUD", "AP", "Wed, 08 Oct 2025 13:00:00 GMT"),
                ("Microsoft signs nuclear power deal", "The Verge", "Thu, 09 Oct 2025 09:00:00 GMT"),
                ("Xbox prices go up again", "IGN", "Tue, 07 Oct 2025 09:00:00 GMT"),
            ]));
        });
        let general = general_mock(&server, &[("General", "BBC", "2025-10-01T00:00:00Z")]);

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server)
                .alpha_vantage_api_key("av_key")
                .news_api_key("news_key"),
        ));
        let briefing = orchestrator.brief("Microsoft", Some("MSFT")).await.unwrap();

        financial.assert();
        google.assert();
        general.assert_hits(0);

        let news = briefing.news.data().unwrap();
        let headlines: Vec<&str> = news.iter().map(|n| n.headline.as_str()).collect();
        assert_eq!(
            headlines,
            [
                "Microsoft signs nuclear power deal",
                "Microsoft beats estimates on cloud",
                "Xbox prices go up again",
            ]
        );
        assert_eq!(news[1].source, "Reuters");
        assert_eq!(
            briefing.data_sources,
            ["Alpha Vantage", "NewsAPI", "Google News"]
        );
    }

    #[tokio::test]
    async fn test_upper_case_name_falls_back_to_search() {
        let server = MockServer::start();
        let unknown = server.mock(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "GLOBAL_QUOTE")
                .query_param("symbol", "APPLE");
            then.status(200).json_body(json!({"Global Quote": {}}));
        });
        let search = search_mock(&server, &[("AAPL", "Apple Inc")]);
        let quote = quote_mock(&server, "AAPL");
        google_mock(&server, &[]);

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server).alpha_vantage_api_key("av_key"),
        ));
        let briefing = orchestrator.brief("APPLE", None).await.unwrap();

        unknown.assert();
        search.assert();
        quote.assert();
        assert_eq!(briefing.ticker.symbol, "AAPL");
        assert_eq!(briefing.ticker.resolution, Resolution::Search);
        assert_eq!(briefing.stock_performance.data().unwrap().price, 414.1);
        assert_eq!(briefing.data_sources, ["Alpha Vantage"]);
    }

    #[tokio::test]
    async fn test_unknown_symbol_without_match_stays_soft() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "GLOBAL_QUOTE");
            then.status(200).json_body(json!({"Global Quote": {}}));
        });
        let search = search_mock(&server, &[]);
        google_mock(&server, &[]);

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server).alpha_vantage_api_key("av_key"),
        ));
        let briefing = orchestrator.brief("ZZZZ", None).await.unwrap();

        search.assert();
        assert_eq!(briefing.ticker.symbol, "ZZZZ");
        assert_eq!(briefing.ticker.resolution, Resolution::Symbol);
        assert_eq!(
            briefing.stock_performance.error().unwrap().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_empty_financial_news_falls_back_to_google() {
        let server = MockServer::start();
        quote_mock(&server, "OMC");
        financial_mock(&server, &[]);
        let google = server.mock(|when, then| {
            when.method(GET)
                .path("/rss/search")
                .query_param("q", "Omnicom OMC");
            then.status(200).body(rss_body(&[
                ("Omnicom closes Interpublic deal", "Reuters", "Tue, 07 Oct 2025 14:05:00 GMT"),
                ("OMNICOM CLOSES INTERPUBLIC DEAL", "AP", "Tue, 07 Oct 2025 15:05:00 GMT"),
                ("Agency layoffs", "Ad Age", "Wed, 08 Oct 2025 09:00:00 GMT"),
            ]));
        });
        let general = general_mock(&server, &[("General", "BBC", "2025-10-01T00:00:00Z")]);

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server)
                .alpha_vantage_api_key("av_key")
                .news_api_key("news_key"),
        ));
        let briefing = orchestrator.brief("Omnicom", Some("OMC")).await.unwrap();

        google.assert();
        general.assert_hits(0);

        let news = briefing.news.data().unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].headline, "Agency layoffs");
        assert_eq!(briefing.data_sources, ["Alpha Vantage", "Google News"]);
        assert_eq!(
            briefing.insights.error().unwrap().kind(),
            ErrorKind::Unconfigured
        );
    }

    #[tokio::test]
    async fn test_general_news_is_last_resort() {
        let server = MockServer::start();
        quote_mock(&server, "MSFT");
        financial_mock(&server, &[]);
        google_mock(&server, &[]);
        let general = general_mock(
            &server,
            &[("Microsoft in the news", "BBC News", "2025-10-01T00:00:00Z")],
        );

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server)
                .alpha_vantage_api_key("av_key")
                .news_api_key("news_key"),
        ));
        let briefing = orchestrator.brief("Microsoft", Some("MSFT")).await.unwrap();

        general.assert();
        assert_eq!(briefing.news.data().unwrap()[0].source, "BBC News");
        assert_eq!(briefing.data_sources, ["Alpha Vantage", "NewsAPI"]);
    }

    #[tokio::test]
    async fn test_news_without_key_uses_google() {
        let server = MockServer::start();
        quote_mock(&server, "MSFT");
        let newsapi = financial_mock(&server, &[("x", "y", "2025-10-01T00:00:00Z")]);
        google_mock(
            &server,
            &[("Microsoft headline", "Reuters", "Tue, 07 Oct 2025 14:05:00 GMT")],
        );

        let orchestrator = BriefingOrchestrator::new(clients(
            config_for(&server).alpha_vantage_api_key("av_key"),
        ));
        let briefing = orchestrator.brief("MSFT", None).await.unwrap();

        newsapi.assert_hits(0);
        assert_eq!(briefing.news.data().unwrap().len(), 1);
    }
}
