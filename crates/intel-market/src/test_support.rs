//! Mock-server fixtures shared by the tool and briefing tests

use crate::api::MarketClients;
use crate::config::{Endpoints, IntelConfig, IntelConfigBuilder};
use httpmock::MockServer;
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

/// Endpoints pointing every provider at one mock server
pub fn endpoints_for(server: &MockServer) -> Endpoints {
    Endpoints {
        alpha_vantage: Url::parse(&server.url("/query")).unwrap(),
        news_api: Url::parse(&server.url("/v2/")).unwrap(),
        google_news: Url::parse(&server.url("/rss/search")).unwrap(),
        gemini: Url::parse(&server.url("/v1beta/")).unwrap(),
    }
}

/// Builder with mock endpoints and no keys
pub fn config_for(server: &MockServer) -> IntelConfigBuilder {
    IntelConfig::builder().endpoints(endpoints_for(server))
}

/// Builder with mock endpoints and every key set
pub fn configured(server: &MockServer) -> IntelConfigBuilder {
    config_for(server)
        .alpha_vantage_api_key("av_key")
        .news_api_key("news_key")
        .gemini_api_key("gem_key")
}

pub fn clients(builder: IntelConfigBuilder) -> Arc<MarketClients> {
    Arc::new(MarketClients::from_config(&builder.build().unwrap()).unwrap())
}

/// `SYMBOL_SEARCH` body with `(symbol, name)` matches
pub fn search_body(matches: &[(&str, &str)]) -> Value {
    let best: Vec<Value> = matches
        .iter()
        .map(|(symbol, name)| {
            json!({
                "1. symbol": symbol,
                "2. name": name,
                "3. type": "Equity",
                "4. region": "United States",
                "8. currency": "USD",
                "9. matchScore": "0.8000"
            })
        })
        .collect();
    json!({ "bestMatches": best })
}

/// `GLOBAL_QUOTE` body
pub fn quote_body(symbol: &str, price: f64, change: f64) -> Value {
    json!({
        "Global Quote": {
            "01. symbol": symbol,
            "02. open": format!("{:.4}", price - change),
            "03. high": format!("{:.4}", price + 2.0),
            "04. low": format!("{:.4}", price - change - 1.0),
            "05. price": format!("{price:.4}"),
            "06. volume": "21000000",
            "07. latest trading day": "2025-10-10",
            "08. previous close": format!("{:.4}", price - change),
            "09. change": format!("{change:.4}"),
            "10. change percent": format!("{:.4}%", change / (price - change) * 100.0)
        }
    })
}

/// NewsAPI `everything` body with `(title, source, publishedAt)` articles
pub fn news_body(articles: &[(&str, &str, &str)]) -> Value {
    let articles: Vec<Value> = articles
        .iter()
        .enumerate()
        .map(|(i, (title, source, published))| {
            json!({
                "source": {"id": null, "name": source},
                "title": title,
                "url": format!("https://news.example.com/{i}"),
                "publishedAt": published
            })
        })
        .collect();
    json!({ "status": "ok", "totalResults": articles.len(), "articles": articles })
}

/// RSS feed with `(title, source, pubDate)` items
pub fn rss_body(items: &[(&str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .enumerate()
        .map(|(i, (title, source, published))| {
            format!(
                "<item><title>{title}</title>\
                 <link>https://news.google.com/rss/articles/{i}</link>\
                 <pubDate>{published}</pubDate>\
                 <source url=\"https://example.com\">{source}</source></item>"
            )
        })
        .collect();
    format!("<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>feed</title>{items}</channel></rss>")
}

/// Gemini `generateContent` body
pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}
