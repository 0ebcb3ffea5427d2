//! Error types for the rates crate.
//!
//! Every failure between an upstream call and a canonical rate is one of the
//! variants of [`RatesError`]. The server decides the HTTP status from
//! [`RatesError::is_upstream`].

use thiserror::Error;

/// Errors that can occur while fetching and shaping a rate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatesError {
    /// A numeric value could not be normalized into a finite rate.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The upstream payload did not match the expected schema.
    #[error("Unexpected upstream shape: {0}")]
    Shape(String),

    /// The upstream answered with a non-success status.
    #[error("Upstream responded {status}: {message}")]
    UpstreamHttp {
        /// HTTP status returned by the upstream
        status: u16,
        /// Reason phrase and a snippet of the body
        message: String,
    },

    /// The bounded wait for the upstream elapsed.
    #[error("Upstream timed out: {url}")]
    UpstreamTimeout {
        /// The URL that timed out
        url: String,
    },

    /// Network-level failure (DNS, connection refused, TLS).
    #[error("Upstream unreachable: {url} - {message}")]
    UpstreamUnreachable {
        /// The URL that could not be reached
        url: String,
        /// Transport error message
        message: String,
    },

    /// The local fallback file could not be read or decoded.
    #[error("Fallback file {path}: {message}")]
    FallbackFile {
        /// Path of the fallback file
        path: String,
        /// Description of the failure
        message: String,
    },
}

impl RatesError {
    /// Returns `true` when the failure was caused by the upstream side
    /// (bad status, transport failure, timeout or malformed body).
    ///
    /// Local failures (number normalization, fallback file) return `false`.
    ///
    /// ```
    /// use madurodolar_rates::RatesError;
    ///
    /// let error = RatesError::Shape("missing field `data`".to_string());
    /// assert!(error.is_upstream());
    ///
    /// let error = RatesError::Parse("empty value".to_string());
    /// assert!(!error.is_upstream());
    /// ```
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Shape(_)
            | Self::UpstreamHttp { .. }
            | Self::UpstreamTimeout { .. }
            | Self::UpstreamUnreachable { .. } => true,

            Self::Parse(_) | Self::FallbackFile { .. } => false,
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
