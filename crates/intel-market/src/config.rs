//! Configuration for the upstream providers
//!
//! Built once at startup and shared by `Arc`; handlers never read the
//! environment themselves.

use crate::error::{MarketError, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/";
pub const DEFAULT_GOOGLE_NEWS_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Upstream data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiProvider {
    /// Ticker search and quotes. Free tier: 25 requests/day, 5/minute.
    AlphaVantage,
    /// Financial and general news. Developer tier: 100 requests/day.
    NewsApi,
    /// Google News RSS search feed (no key)
    GoogleNews,
    /// Gemini text generation for AI summaries
    Gemini,
}

impl ApiProvider {
    pub const ALL: [ApiProvider; 4] = [
        Self::AlphaVantage,
        Self::NewsApi,
        Self::GoogleNews,
        Self::Gemini,
    ];

    /// Human-readable provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AlphaVantage => "Alpha Vantage",
            Self::NewsApi => "NewsAPI",
            Self::GoogleNews => "Google News",
            Self::Gemini => "Gemini",
        }
    }

    /// Environment variable holding the API key, if the provider needs one
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            Self::AlphaVantage => Some("ALPHA_VANTAGE_API_KEY"),
            Self::NewsApi => Some("NEWS_API_KEY"),
            Self::GoogleNews => None,
            Self::Gemini => Some("GEMINI_API_KEY"),
        }
    }

    /// Error returned when a tool needs this provider but no key is set
    pub fn missing_key_error(&self) -> MarketError {
        MarketError::MissingApiKey(format!(
            "{} is not configured. Set {} to enable it.",
            self.display_name(),
            self.env_var().unwrap_or("its API key"),
        ))
    }
}

impl fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Base URLs of the upstream APIs
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub alpha_vantage: Url,
    pub news_api: Url,
    pub google_news: Url,
    pub gemini: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            alpha_vantage: parse_static(DEFAULT_ALPHA_VANTAGE_URL),
            news_api: parse_static(DEFAULT_NEWS_API_URL),
            google_news: parse_static(DEFAULT_GOOGLE_NEWS_URL),
            gemini: parse_static(DEFAULT_GEMINI_URL),
        }
    }
}

#[allow(clippy::expect_used)]
fn parse_static(url: &str) -> Url {
    Url::parse(url).expect("default endpoint URLs are valid")
}

/// Configuration for the client-intel tools
#[derive(Clone)]
pub struct IntelConfig {
    /// Alpha Vantage API key (ticker search, quotes)
    pub alpha_vantage_api_key: Option<String>,

    /// NewsAPI key (financial and general news)
    pub news_api_key: Option<String>,

    /// Gemini API key (AI summaries)
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    pub gemini_model: String,

    /// Per-request timeout applied by the shared HTTP client
    pub request_timeout: Duration,

    /// User-Agent sent to every provider
    pub user_agent: String,

    /// Provider base URLs
    pub endpoints: Endpoints,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            news_api_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: format!("client-intel/{}", env!("CARGO_PKG_VERSION")),
            endpoints: Endpoints::default(),
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for IntelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: Option<&String>) -> &'static str {
            if key.is_some() { "<set>" } else { "<unset>" }
        }

        f.debug_struct("IntelConfig")
            .field("alpha_vantage_api_key", &redact(self.alpha_vantage_api_key.as_ref()))
            .field("news_api_key", &redact(self.news_api_key.as_ref()))
            .field("gemini_api_key", &redact(self.gemini_api_key.as_ref()))
            .field("gemini_model", &self.gemini_model)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl IntelConfig {
    /// Create a new configuration builder
    pub fn builder() -> IntelConfigBuilder {
        IntelConfigBuilder::default()
    }

    /// Load keys and overrides from the process environment
    ///
    /// Reads `ALPHA_VANTAGE_API_KEY`, `NEWS_API_KEY`, `GEMINI_API_KEY`,
    /// `GEMINI_MODEL` and `INTEL_REQUEST_TIMEOUT_SECS`. Missing keys leave the
    /// dependent tools disabled; they are not an error.
    pub fn from_env() -> Result<Self> {
        IntelConfigBuilder::default().with_env().build()
    }

    /// Whether the provider can be used with this configuration
    pub fn is_configured(&self, provider: ApiProvider) -> bool {
        match provider {
            ApiProvider::AlphaVantage => self.alpha_vantage_api_key.is_some(),
            ApiProvider::NewsApi => self.news_api_key.is_some(),
            ApiProvider::GoogleNews => true,
            ApiProvider::Gemini => self.gemini_api_key.is_some(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.gemini_model.trim().is_empty() {
            return Err(MarketError::ConfigError(
                "gemini_model must not be empty".to_string(),
            ));
        }

        for (name, url) in [
            ("alpha_vantage", &self.endpoints.alpha_vantage),
            ("news_api", &self.endpoints.news_api),
            ("google_news", &self.endpoints.google_news),
            ("gemini", &self.endpoints.gemini),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(MarketError::ConfigError(format!(
                    "{name} endpoint must be http(s), got {url}"
                )));
            }
        }

        Ok(())
    }
}

/// Builder for IntelConfig
#[derive(Debug, Default)]
pub struct IntelConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    news_api_key: Option<String>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    endpoints: Option<Endpoints>,
    timeout_error: Option<String>,
}

impl IntelConfigBuilder {
    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Set the Gemini model
    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override provider base URLs
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Self {
        use intel_utils::non_empty_var;

        if self.alpha_vantage_api_key.is_none() {
            self.alpha_vantage_api_key = non_empty_var("ALPHA_VANTAGE_API_KEY");
        }
        if self.news_api_key.is_none() {
            self.news_api_key = non_empty_var("NEWS_API_KEY");
        }
        if self.gemini_api_key.is_none() {
            self.gemini_api_key = non_empty_var("GEMINI_API_KEY");
        }
        if self.gemini_model.is_none() {
            self.gemini_model = non_empty_var("GEMINI_MODEL");
        }
        if self.request_timeout.is_none() {
            if let Some(raw) = non_empty_var("INTEL_REQUEST_TIMEOUT_SECS") {
                match raw.parse::<u64>() {
                    Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                    Err(_) => {
                        self.timeout_error = Some(format!(
                            "INTEL_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                        ));
                    }
                }
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<IntelConfig> {
        if let Some(message) = self.timeout_error {
            return Err(MarketError::ConfigError(message));
        }

        let defaults = IntelConfig::default();

        let config = IntelConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            news_api_key: self.news_api_key,
            gemini_api_key: self.gemini_api_key,
            gemini_model: self.gemini_model.unwrap_or(defaults.gemini_model),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            endpoints: self.endpoints.unwrap_or(defaults.endpoints),
        };

        config.validate()?;
        Ok(config)
    }
}
