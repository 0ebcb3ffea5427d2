//! Official rate read from a local JSON file.
//!
//! Used when live fetching is disabled. The file holds
//! `{ "rate": 36.5, "updated": "2025-06-06T12:55:00.000Z" }` and is read
//! synchronously on every request, so edits take effect without a restart.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::RatesError;
use crate::models::{parse_timestamp, FallbackRate, OfficialRate};
use crate::provider::OfficialRateSource;

const PROVIDER_ID: &str = "FALLBACK_FILE";

pub struct FallbackFileSource {
    path: PathBuf,
}

impl FallbackFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the file.
    pub fn read(&self) -> Result<OfficialRate, RatesError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.error(e.to_string()))?;
        let fallback: FallbackRate =
            serde_json::from_str(&raw).map_err(|e| self.error(e.to_string()))?;

        let updated = parse_timestamp(&fallback.updated).map_err(|e| self.error(e.to_string()))?;
        OfficialRate::new(fallback.rate, updated).map_err(|e| self.error(e.to_string()))
    }

    fn error(&self, message: String) -> RatesError {
        RatesError::FallbackFile {
            path: self.path.display().to_string(),
            message,
        }
    }
}

#[async_trait]
impl OfficialRateSource for FallbackFileSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_official(&self) -> Result<OfficialRate, RatesError> {
        self.read()
    }
}
