//! CriptoYa sources.
//!
//! CriptoYa aggregates Venezuelan dollar rates behind two JSON endpoints:
//! - `/api/dolar/paralelo` → `{ "sell": 132.45, "buy": 131.00, "variation": -0.12, "date": "..." }`
//! - `/api/dolar/oficial`  → `{ "oficial": 174231.00, "date": "..." }`
//!
//! Unknown pairs are answered with plain text (`Invalid pair`), which the
//! payload decoder turns into a shape error.

use async_trait::async_trait;
use chrono::Utc;

use crate::client::{UpstreamClient, UpstreamRequest};
use crate::errors::RatesError;
use crate::models::{OfficialRate, PayloadSchema, RateQuote};
use crate::provider::{OfficialRateSource, QuoteSource};
use crate::shaper;

/// Default CriptoYa parallel quote endpoint.
pub const DEFAULT_PARALLEL_URL: &str = "https://criptoya.com/api/dolar/paralelo";

/// Default CriptoYa official rate endpoint.
pub const DEFAULT_OFFICIAL_URL: &str = "https://criptoya.com/api/dolar/oficial";

const PARALLEL_ID: &str = "CRIPTOYA_PARALELO";
const OFFICIAL_ID: &str = "CRIPTOYA_OFICIAL";

/// Parallel quote read from CriptoYa in a single call.
pub struct CriptoYaParallelSource {
    client: UpstreamClient,
    url: String,
}

impl CriptoYaParallelSource {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for CriptoYaParallelSource {
    fn id(&self) -> &'static str {
        PARALLEL_ID
    }

    async fn fetch_quote(&self) -> Result<RateQuote, RatesError> {
        let payload = self
            .client
            .fetch_payload(&UpstreamRequest::get(self.url.clone()), PayloadSchema::Quote)
            .await?;

        shaper::quote_from_direct(&payload, Utc::now())
    }
}

/// Official BCV rate as republished by CriptoYa.
pub struct CriptoYaOfficialSource {
    client: UpstreamClient,
    url: String,
}

impl CriptoYaOfficialSource {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl OfficialRateSource for CriptoYaOfficialSource {
    fn id(&self) -> &'static str {
        OFFICIAL_ID
    }

    async fn fetch_official(&self) -> Result<OfficialRate, RatesError> {
        let payload = self
            .client
            .fetch_payload(
                &UpstreamRequest::get(self.url.clone()),
                PayloadSchema::Official,
            )
            .await?;

        shaper::official_from_payload(&payload, Utc::now())
    }
}
