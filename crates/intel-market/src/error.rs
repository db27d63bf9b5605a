//! Error types for upstream market-data operations

use intel_core::ToolError;
use thiserror::Error;

/// Failures raised by the upstream clients
#[derive(Debug, Error)]
pub enum MarketError {
    /// Network, timeout, or TLS failure
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("{provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered 2xx but the body reports an error
    #[error("{provider} error: {message}")]
    ProviderError {
        provider: &'static str,
        message: String,
    },

    /// Provider reports the quota is exhausted
    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimitExceeded {
        provider: &'static str,
        message: String,
    },

    /// Body could not be decoded into the expected shape
    #[error("Failed to decode {provider} response: {message}")]
    DecodeError {
        provider: &'static str,
        message: String,
    },

    /// Provider answered, but with nothing usable for the query
    #[error("{0}")]
    NotFound(String),

    /// API key missing
    #[error("{0}")]
    MissingApiKey(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// Request URLs can carry API keys in the query string.
impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        MarketError::NetworkError(err.without_url())
    }
}

/// Result type alias for upstream operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Every upstream failure surfaces as one of the tool error kinds
impl From<MarketError> for ToolError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::NotFound(msg) => ToolError::NotFound(msg),
            MarketError::MissingApiKey(msg) => ToolError::Unconfigured(msg),
            other => ToolError::UpstreamUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_core::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = MarketError::HttpStatus {
            provider: "NewsAPI",
            status: 401,
            body: "apiKeyInvalid".to_string(),
        };
        assert_eq!(err.to_string(), "NewsAPI returned HTTP 401: apiKeyInvalid");
    }

    #[test]
    fn test_error_conversion() {
        let tool_err: ToolError = MarketError::RateLimitExceeded {
            provider: "Alpha Vantage",
            message: "25 requests per day".to_string(),
        }
        .into();
        assert_eq!(tool_err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(tool_err.message().contains("Alpha Vantage"));

        let tool_err: ToolError = MarketError::NotFound("no quote for 'ZZZZ'".to_string()).into();
        assert_eq!(tool_err.kind(), ErrorKind::NotFound);

        let tool_err: ToolError =
            MarketError::MissingApiKey("NEWS_API_KEY is not set".to_string()).into();
        assert_eq!(tool_err.kind(), ErrorKind::Unconfigured);
    }
}
