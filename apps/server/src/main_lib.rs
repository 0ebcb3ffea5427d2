//! Process wiring for the rates server: log setup and the shared state that
//! routes read (one quote source, one official source, picked from `Config`).

use std::sync::Arc;

use anyhow::Context;
use madurodolar_rates::{
    provider::{bcv_page, binance_p2p, criptoya},
    BcvPageSource, BinanceP2pSource, CriptoYaOfficialSource, CriptoYaParallelSource,
    FallbackFileSource, OfficialRateSource, QuoteSource, UpstreamClient, UpstreamClientConfig,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, OfficialSourceKind, QuoteSourceKind};

pub struct AppState {
    pub quote_source: Arc<dyn QuoteSource>,
    pub official_source: Arc<dyn OfficialRateSource>,
}

/// Install the global subscriber. `RUST_LOG` filters (default `info`) and
/// `MD_LOG_FORMAT=json` switches to one JSON object per line.
pub fn init_tracing() {
    let log_format = std::env::var("MD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = UpstreamClient::new(&UpstreamClientConfig {
        timeout: config.upstream_timeout,
        insecure_tls: config.insecure_tls,
        ..UpstreamClientConfig::default()
    })
    .context("Failed to build upstream HTTP client")?;

    if config.insecure_tls {
        tracing::warn!("TLS certificate verification is disabled for upstream calls");
    }

    let quote_source: Arc<dyn QuoteSource> = match config.quote_source {
        QuoteSourceKind::BinanceP2p => Arc::new(BinanceP2pSource::new(
            client.clone(),
            url_or(&config.quote_url, binance_p2p::DEFAULT_URL),
        )),
        QuoteSourceKind::CriptoYa => Arc::new(CriptoYaParallelSource::new(
            client.clone(),
            url_or(&config.quote_url, criptoya::DEFAULT_PARALLEL_URL),
        )),
    };

    let official_source: Arc<dyn OfficialRateSource> = match config.official_source {
        OfficialSourceKind::CriptoYa => Arc::new(CriptoYaOfficialSource::new(
            client,
            url_or(&config.official_url, criptoya::DEFAULT_OFFICIAL_URL),
        )),
        OfficialSourceKind::BcvPage => Arc::new(BcvPageSource::new(
            client,
            url_or(&config.official_url, bcv_page::DEFAULT_URL),
        )),
        OfficialSourceKind::File => {
            Arc::new(FallbackFileSource::new(config.fallback_file.clone()))
        }
    };

    tracing::info!(
        "Quote source: {}, official source: {}",
        quote_source.id(),
        official_source.id()
    );

    Ok(Arc::new(AppState {
        quote_source,
        official_source,
    }))
}

fn url_or(url: &Option<String>, default: &str) -> String {
    url.clone().unwrap_or_else(|| default.to_string())
}
