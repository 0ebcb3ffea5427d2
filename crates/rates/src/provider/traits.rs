//! Rate source trait definitions.

use async_trait::async_trait;

use crate::errors::RatesError;
use crate::models::{OfficialRate, RateQuote};

/// Source of the two-sided parallel quote served by `/api/binance`.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use madurodolar_rates::{QuoteSource, RateQuote, RatesError};
///
/// struct FixedQuote;
///
/// #[async_trait]
/// impl QuoteSource for FixedQuote {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_quote(&self) -> Result<RateQuote, RatesError> {
///         Ok(RateQuote::two_sided(130.0, 129.5, chrono::Utc::now()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Constant identifier used in logs, e.g. "BINANCE_P2P".
    fn id(&self) -> &'static str;

    /// Fetch both legs and shape them into a [`RateQuote`].
    ///
    /// If either leg fails the whole call fails.
    async fn fetch_quote(&self) -> Result<RateQuote, RatesError>;
}

/// Source of the official rate served by `/api/bcv`.
#[async_trait]
pub trait OfficialRateSource: Send + Sync {
    /// Constant identifier used in logs, e.g. "CRIPTOYA_OFICIAL".
    fn id(&self) -> &'static str;

    /// Fetch the official rate.
    async fn fetch_official(&self) -> Result<OfficialRate, RatesError>;
}
