use serde::{Deserialize, Serialize};

use crate::errors::RatesError;
use crate::normalize::{ensure_finite, normalize_rate};

/// A price field as upstreams send it: a JSON number or a string.
///
/// Any other JSON type fails to decode, which surfaces as a shape error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    /// Normalize into a finite `f64`.
    pub fn to_f64(&self) -> Result<f64, RatesError> {
        match self {
            RateValue::Number(n) => ensure_finite(*n, &n.to_string()),
            RateValue::Text(s) => normalize_rate(s),
        }
    }
}

impl From<f64> for RateValue {
    fn from(value: f64) -> Self {
        RateValue::Number(value)
    }
}

impl From<&str> for RateValue {
    fn from(value: &str) -> Self {
        RateValue::Text(value.to_string())
    }
}
