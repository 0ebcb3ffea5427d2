use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::errors::RatesError;
use crate::normalize::format_two_decimals;

/// Two-sided market quote served by `/api/binance`.
///
/// `sell` and `buy` are either both present or both `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateQuote {
    pub sell: Option<String>,
    pub buy: Option<String>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated: DateTime<Utc>,
}

impl RateQuote {
    /// Quote with both sides rendered to two decimals.
    pub fn two_sided(sell: f64, buy: f64, updated: DateTime<Utc>) -> Self {
        Self {
            sell: Some(format_two_decimals(sell)),
            buy: Some(format_two_decimals(buy)),
            updated,
        }
    }

    /// Quote for an upstream that reported neither side.
    pub fn unavailable(updated: DateTime<Utc>) -> Self {
        Self {
            sell: None,
            buy: None,
            updated,
        }
    }
}

/// Official rate served by `/api/bcv`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfficialRate {
    pub rate: f64,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated: DateTime<Utc>,
}

impl OfficialRate {
    /// Build an official rate, rejecting non-finite or negative values.
    pub fn new(rate: f64, updated: DateTime<Utc>) -> Result<Self, RatesError> {
        if !rate.is_finite() {
            return Err(RatesError::parse(format!("official rate {} is not finite", rate)));
        }
        if rate < 0.0 {
            return Err(RatesError::shape(format!("official rate {} is negative", rate)));
        }
        Ok(Self { rate, updated })
    }
}

/// On-disk fallback for the official rate: `{ "rate": 36.5, "updated": "..." }`.
#[derive(Clone, Debug, Deserialize)]
pub struct FallbackRate {
    pub rate: f64,
    pub updated: String,
}
