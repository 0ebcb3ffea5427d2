//! Binance P2P source for the parallel USDT/VES quote.
//!
//! Binance has no public ticker for P2P prices, so each leg is a POST to the
//! `adv/search` endpoint the P2P web page uses. The SELL and BUY searches are
//! issued concurrently and the first five offers of each are averaged.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::client::{UpstreamClient, UpstreamRequest};
use crate::errors::RatesError;
use crate::models::{PayloadSchema, RateQuote, UpstreamPayload};
use crate::provider::QuoteSource;
use crate::shaper;

/// Default Binance P2P search endpoint.
pub const DEFAULT_URL: &str = "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search";

const PROVIDER_ID: &str = "BINANCE_P2P";
const ASSET: &str = "USDT";
const FIAT: &str = "VES";
const ROWS: u32 = 5;
const ORIGIN: &str = "https://p2p.binance.com";

/// Direction of a P2P search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeType {
    Sell,
    Buy,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Sell => "SELL",
            TradeType::Buy => "BUY",
        }
    }
}

pub struct BinanceP2pSource {
    client: UpstreamClient,
    url: String,
}

impl BinanceP2pSource {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn search_request(&self, trade_type: TradeType) -> UpstreamRequest {
        let body = json!({
            "asset": ASSET,
            "fiat": FIAT,
            "merchantCheck": false,
            "page": 1,
            "payTypes": [],
            "publisherType": null,
            "rows": ROWS,
            "tradeType": trade_type.as_str(),
        });

        UpstreamRequest::post_json(self.url.clone(), body)
            .with_header("Accept", "*/*")
            .with_header("Accept-Language", "en-US,en;q=0.9")
            .with_header("Origin", ORIGIN)
            .with_header("Referer", format!("{}/", ORIGIN))
    }

    async fn fetch_leg(&self, trade_type: TradeType) -> Result<UpstreamPayload, RatesError> {
        let payload = self
            .client
            .fetch_payload(&self.search_request(trade_type), PayloadSchema::Offers)
            .await?;
        debug!("{} {} leg fetched", PROVIDER_ID, trade_type.as_str());
        Ok(payload)
    }
}

#[async_trait]
impl QuoteSource for BinanceP2pSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_quote(&self) -> Result<RateQuote, RatesError> {
        let (sell, buy) = tokio::try_join!(
            self.fetch_leg(TradeType::Sell),
            self.fetch_leg(TradeType::Buy)
        )?;

        shaper::quote_from_offers(&sell, &buy, Utc::now())
    }
}
