//! Upstream rate sources.
//!
//! This module contains:
//! - The [`QuoteSource`] and [`OfficialRateSource`] traits the server depends on
//! - One implementation per upstream (Binance P2P, CriptoYa, BCV page, local file)
//!
//! Sources only fetch and decode. Turning a payload into a canonical rate is
//! delegated to [`crate::shaper`].

mod traits;

pub mod bcv_page;
pub mod binance_p2p;
pub mod criptoya;
pub mod fallback_file;

pub use traits::{OfficialRateSource, QuoteSource};
