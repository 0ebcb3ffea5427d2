//! MaduroDólar rates crate
//!
//! Fetches USD/VES rates from third-party sources and reshapes them into the
//! two canonical shapes the website consumes:
//!
//! - [`RateQuote`] `{ sell, buy, updated }` for the parallel market
//! - [`OfficialRate`] `{ rate, updated }` for the official BCV rate
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  UpstreamClient  | --> | UpstreamPayload  |  (typed schema decoding)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     shaper       |  (pure, uses normalize)
//!                          +------------------+
//!                                  |
//!                                  v
//!                       +----------------------+
//!                       | RateQuote / Official |  (canonical shape)
//!                       +----------------------+
//! ```
//!
//! Sources ([`QuoteSource`], [`OfficialRateSource`]) wire a client call to a
//! shaper function for one upstream each.

pub mod client;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod shaper;

pub use client::{UpstreamClient, UpstreamClientConfig, UpstreamRequest, UpstreamResponse};
pub use errors::RatesError;
pub use models::{OfficialRate, PayloadSchema, RateQuote, RateValue, UpstreamPayload};
pub use normalize::normalize_rate;

pub use provider::bcv_page::BcvPageSource;
pub use provider::binance_p2p::BinanceP2pSource;
pub use provider::criptoya::{CriptoYaOfficialSource, CriptoYaParallelSource};
pub use provider::fallback_file::FallbackFileSource;
pub use provider::{OfficialRateSource, QuoteSource};
