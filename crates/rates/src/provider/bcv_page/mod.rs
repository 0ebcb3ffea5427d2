//! Official rate scraped from the Banco Central de Venezuela home page.
//!
//! The page is HTML; the rate sits in `<span class="tasa-oficial">` using
//! locale formatting. The site has served incomplete certificate chains,
//! which is why the upstream client can be built with TLS verification off.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::client::{UpstreamClient, UpstreamRequest};
use crate::errors::RatesError;
use crate::models::{OfficialRate, PayloadSchema};
use crate::provider::OfficialRateSource;
use crate::shaper;

/// Default BCV home page.
pub const DEFAULT_URL: &str = "https://www.bcv.org.ve/";

const PROVIDER_ID: &str = "BCV_PAGE";

pub struct BcvPageSource {
    client: UpstreamClient,
    url: String,
}

impl BcvPageSource {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl OfficialRateSource for BcvPageSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_official(&self) -> Result<OfficialRate, RatesError> {
        let request = UpstreamRequest::get(self.url.clone()).with_header("Accept", "text/html");
        let payload = self.client.fetch_payload(&request, PayloadSchema::Page).await?;
        debug!("{} page fetched", PROVIDER_ID);

        shaper::official_from_page(&payload, Utc::now())
    }
}
