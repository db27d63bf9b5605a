//! Error types for tool invocations

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for tool handlers
pub type Result<T> = std::result::Result<T, ToolError>;

/// Category of a tool failure, as seen by the host model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing or malformed parameter
    InvalidInput,
    /// No matching ticker, quote, or news items
    NotFound,
    /// Network failure, timeout, non-2xx status, or provider error body
    UpstreamUnavailable,
    /// Required API key is not configured
    Unconfigured,
}

impl ErrorKind {
    /// Stable wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::NotFound => "NotFound",
            Self::UpstreamUnavailable => "UpstreamUnavailable",
            Self::Unconfigured => "Unconfigured",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a tool handler
///
/// Serializes as the `{kind, message}` descriptor handed back to the host.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ErrorDescriptor", from = "ErrorDescriptor")]
pub enum ToolError {
    /// Missing or malformed parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing matched the query
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream provider could not be reached or answered with an error
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// API key for the provider is missing
    #[error("Not configured: {0}")]
    Unconfigured(String),
}

impl ToolError {
    /// Create an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a `NotFound` error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an `UpstreamUnavailable` error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    /// Create an `Unconfigured` error
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::Unconfigured(message.into())
    }

    /// The error's kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::Unconfigured(_) => ErrorKind::Unconfigured,
        }
    }

    /// The human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m)
            | Self::NotFound(m)
            | Self::UpstreamUnavailable(m)
            | Self::Unconfigured(m) => m,
        }
    }

    /// Wire descriptor for this error
    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor {
            kind: self.kind(),
            message: self.message().to_string(),
        }
    }
}

/// `{kind, message}` form of a [`ToolError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<ToolError> for ErrorDescriptor {
    fn from(err: ToolError) -> Self {
        err.descriptor()
    }
}

impl From<ErrorDescriptor> for ToolError {
    fn from(descriptor: ErrorDescriptor) -> Self {
        let ErrorDescriptor { kind, message } = descriptor;
        match kind {
            ErrorKind::InvalidInput => Self::InvalidInput(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::UpstreamUnavailable => Self::UpstreamUnavailable(message),
            ErrorKind::Unconfigured => Self::Unconfigured(message),
        }
    }
}
