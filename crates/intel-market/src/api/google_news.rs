//! Google News RSS search feed
//!
//! No key required. The feed is RSS 2.0; each `<item>` carries the headline,
//! the article link, an RFC 2822 `pubDate` and a `<source>` element naming
//! the publisher.

use crate::error::{MarketError, Result};
use crate::models::NewsItem;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

const PROVIDER: &str = "Google News";

/// Google News RSS client
#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
    #[serde(default)]
    source: Option<RssSource>,
}

#[derive(Debug, Deserialize)]
struct RssSource {
    #[serde(rename = "$text", default)]
    name: String,
}

impl RssItem {
    fn into_item(self) -> Option<NewsItem> {
        let headline = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let url = self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
        let source = self
            .source
            .map(|s| s.name.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PROVIDER.to_string());

        Some(NewsItem {
            headline: headline.to_string(),
            source,
            published_at: self
                .pub_date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
                .map(|d| d.with_timezone(&Utc)),
            url: url.to_string(),
        })
    }
}

/// Parse an RSS document into news items, in feed order
pub fn parse_feed(xml: &str) -> Result<Vec<NewsItem>> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| MarketError::DecodeError {
        provider: PROVIDER,
        message: e.to_string(),
    })?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(RssItem::into_item)
        .collect())
}

impl GoogleNewsClient {
    /// Create a new Google News client
    ///
    /// `base_url` is the search feed, normally `https://news.google.com/rss/search`.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Search the feed for a free-text query
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("q", query),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await?;

        let body = super::read_text(PROVIDER, response).await?;
        let items = parse_feed(&body)?;

        debug!(count = items.len(), "Google News search complete");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"Omnicom Group" - Google News</title>
    <link>https://news.google.com/search?q=Omnicom+Group</link>
    <language>en-US</language>
    <item>
      <title>Omnicom closes Interpublic deal - Reuters</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <guid isPermaLink="false">abc</guid>
      <pubDate>Tue, 07 Oct 2025 14:05:00 GMT</pubDate>
      <description>&lt;a href="x"&gt;Omnicom&lt;/a&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Untitled link only</title>
      <link></link>
      <source url="https://example.com">Example</source>
    </item>
    <item>
      <title>Agency shake-up &amp; layoffs</title>
      <link>https://news.google.com/rss/articles/def</link>
      <pubDate>Wed, 08 Oct 2025 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed() {
        let items = parse_feed(FEED).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "Omnicom closes Interpublic deal - Reuters");
        assert_eq!(items[0].source, "Reuters");
        assert!(items[0].published_at.is_some());
        assert_eq!(items[1].headline, "Agency shake-up & layoffs");
        assert_eq!(items[1].source, "Google News");
    }

    #[test]
    fn test_parse_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>none</title></channel></rss>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        let err = parse_feed("<html><body>blocked</body>").unwrap_err();
        assert!(matches!(err, MarketError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_search_sends_locale_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rss/search")
                .query_param("q", "Omnicom Group OMC")
                .query_param("hl", "en-US")
                .query_param("ceid", "US:en");
            then.status(200)
                .header("content-type", "application/rss+xml")
                .body(FEED);
        });

        let client = GoogleNewsClient::new(
            Client::new(),
            Url::parse(&server.url("/rss/search")).unwrap(),
        );
        let items = client.search("Omnicom Group OMC").await.unwrap();

        mock.assert();
        assert_eq!(items.len(), 2);
    }
}
