//! Upstream payload schemas.
//!
//! Each upstream body is decoded against the schema the caller expects,
//! producing one variant of [`UpstreamPayload`] or a shape error. Raw text is
//! first checked to be JSON at all, so plain-text answers such as
//! `Invalid pair` are reported with a snippet instead of a serde message.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::value::RateValue;
use crate::errors::RatesError;

/// Maximum number of characters of an upstream body quoted in errors.
pub(crate) const SNIPPET_LEN: usize = 100;

/// Binance P2P `adv/search` page: `{ "data": [ { "adv": { "price": "130.00" } } ] }`.
#[derive(Clone, Debug, Deserialize)]
pub struct OffersPage {
    #[serde(default)]
    pub data: Option<Vec<Offer>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Offer {
    pub adv: AdvDetail,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdvDetail {
    pub price: RateValue,
}

/// Two-sided quote exposed directly: `{ "sell": 132.45, "buy": 131.0, "date": "..." }`.
#[derive(Clone, Debug, Deserialize)]
pub struct DirectQuote {
    #[serde(default)]
    pub sell: Option<RateValue>,
    #[serde(default)]
    pub buy: Option<RateValue>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Official rate: `{ "oficial": 174231.00, "date": "..." }`.
#[derive(Clone, Debug, Deserialize)]
pub struct OfficialQuote {
    pub oficial: RateValue,
    #[serde(default)]
    pub date: Option<String>,
}

/// The schema a caller expects an upstream body to follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadSchema {
    Offers,
    Quote,
    Official,
    Page,
}

impl PayloadSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadSchema::Offers => "offers page",
            PayloadSchema::Quote => "direct quote",
            PayloadSchema::Official => "official rate",
            PayloadSchema::Page => "html page",
        }
    }
}

/// A decoded upstream body.
#[derive(Clone, Debug)]
pub enum UpstreamPayload {
    Offers(OffersPage),
    Quote(DirectQuote),
    Official(OfficialQuote),
    Page(String),
}

impl UpstreamPayload {
    /// Decode `body` against `schema`.
    pub fn decode(schema: PayloadSchema, body: &str) -> Result<Self, RatesError> {
        match schema {
            PayloadSchema::Offers => decode_json(schema, body).map(UpstreamPayload::Offers),
            PayloadSchema::Quote => decode_json(schema, body).map(UpstreamPayload::Quote),
            PayloadSchema::Official => decode_json(schema, body).map(UpstreamPayload::Official),
            PayloadSchema::Page => Ok(UpstreamPayload::Page(body.to_string())),
        }
    }

    pub fn schema(&self) -> PayloadSchema {
        match self {
            UpstreamPayload::Offers(_) => PayloadSchema::Offers,
            UpstreamPayload::Quote(_) => PayloadSchema::Quote,
            UpstreamPayload::Official(_) => PayloadSchema::Official,
            UpstreamPayload::Page(_) => PayloadSchema::Page,
        }
    }
}

fn decode_json<T: DeserializeOwned>(schema: PayloadSchema, body: &str) -> Result<T, RatesError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|_| {
        RatesError::shape(format!("invalid JSON from upstream: \"{}\"", snippet(body)))
    })?;

    serde_json::from_value(value)
        .map_err(|e| RatesError::shape(format!("{}: {}", schema.as_str(), e)))
}

pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}
