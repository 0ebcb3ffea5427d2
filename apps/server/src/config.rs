use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_FALLBACK_FILE: &str = "./data/bcv.json";

/// Upstream behind `/api/binance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteSourceKind {
    BinanceP2p,
    CriptoYa,
}

impl FromStr for QuoteSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binance_p2p" | "binance" => Ok(Self::BinanceP2p),
            "criptoya" => Ok(Self::CriptoYa),
            other => Err(anyhow!("unknown quote source '{}'", other)),
        }
    }
}

/// Upstream behind `/api/bcv`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfficialSourceKind {
    CriptoYa,
    BcvPage,
    File,
}

impl FromStr for OfficialSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "criptoya" => Ok(Self::CriptoYa),
            "bcv_page" | "bcv" => Ok(Self::BcvPage),
            "file" => Ok(Self::File),
            other => Err(anyhow!("unknown official source '{}'", other)),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub quote_source: QuoteSourceKind,
    /// Overrides the default URL of the quote source.
    pub quote_url: Option<String>,
    pub official_source: OfficialSourceKind,
    /// Overrides the default URL of the official source.
    pub official_url: Option<String>,
    pub fallback_file: PathBuf,
    pub upstream_timeout: Duration,
    pub insecure_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_allow: vec!["*".to_string()],
            quote_source: QuoteSourceKind::BinanceP2p,
            quote_url: None,
            official_source: OfficialSourceKind::CriptoYa,
            official_url: None,
            fallback_file: PathBuf::from(DEFAULT_FALLBACK_FILE),
            upstream_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            insecure_tls: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = match (var("MD_LISTEN_ADDR"), var("PORT")) {
            (Some(addr), _) => addr
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid MD_LISTEN_ADDR '{}'", addr))?,
            (None, Some(port)) => {
                let port = port
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid PORT '{}'", port))?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => defaults.listen_addr,
        };

        let cors_allow: Vec<String> = var("MD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_allow.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid origin '{}' in MD_CORS_ALLOW_ORIGINS", origin))?;
        }

        let quote_source = match var("MD_QUOTE_SOURCE") {
            Some(s) => s.parse::<QuoteSourceKind>().context("Invalid MD_QUOTE_SOURCE")?,
            None => defaults.quote_source,
        };
        let official_source = match var("MD_OFFICIAL_SOURCE") {
            Some(s) => s.parse::<OfficialSourceKind>().context("Invalid MD_OFFICIAL_SOURCE")?,
            None => defaults.official_source,
        };

        let upstream_timeout = match var("MD_UPSTREAM_TIMEOUT_MS") {
            Some(ms) => {
                let millis = ms
                    .trim()
                    .parse::<u64>()
                    .map_err(anyhow::Error::from)
                    .and_then(|millis| match millis {
                        0 => Err(anyhow!("timeout must be greater than zero")),
                        millis => Ok(millis),
                    })
                    .with_context(|| format!("Invalid MD_UPSTREAM_TIMEOUT_MS '{}'", ms))?;
                Duration::from_millis(millis)
            }
            None => defaults.upstream_timeout,
        };

        let insecure_tls = match var("MD_INSECURE_TLS") {
            Some(flag) => parse_flag(&flag).context("Invalid MD_INSECURE_TLS")?,
            None => defaults.insecure_tls,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            quote_source,
            quote_url: var("MD_QUOTE_URL"),
            official_source,
            official_url: var("MD_OFFICIAL_URL"),
            fallback_file: var("MD_FALLBACK_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_file),
            upstream_timeout,
            insecure_tls,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{}'", other)),
    }
}
