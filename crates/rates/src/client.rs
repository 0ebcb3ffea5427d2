//! Single-shot HTTP client for upstream rate sources.
//!
//! The client never retries. Every call is bounded by a timeout (10 seconds
//! unless configured otherwise) and every failure is mapped onto one of the
//! upstream variants of [`RatesError`].

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::RatesError;
use crate::models::{snippet, PayloadSchema, UpstreamPayload};

/// Default bounded wait for one upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Some upstreams reject requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Settings shared by every upstream call.
#[derive(Clone, Debug)]
pub struct UpstreamClientConfig {
    pub timeout: Duration,
    /// Accept invalid TLS certificates (the BCV site has served broken chains).
    pub insecure_tls: bool,
    pub user_agent: String,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            insecure_tls: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum UpstreamMethod {
    Get,
    PostJson(serde_json::Value),
}

/// One outbound request.
#[derive(Clone, Debug)]
pub struct UpstreamRequest {
    pub url: String,
    pub method: UpstreamMethod,
    pub headers: Vec<(&'static str, String)>,
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl UpstreamRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: UpstreamMethod::Get,
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: UpstreamMethod::PostJson(body),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw upstream answer: status plus text body.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Thin wrapper around a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()?;

        Ok(Self { client })
    }

    /// Issue `request` once and return its status and body.
    ///
    /// Fails with `UpstreamHttp` on a non-2xx status, `UpstreamTimeout` when the
    /// bounded wait elapses and `UpstreamUnreachable` on any other transport
    /// failure.
    pub async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, RatesError> {
        let mut builder = match &request.method {
            UpstreamMethod::Get => self.client.get(&request.url),
            UpstreamMethod::PostJson(body) => self.client.post(&request.url).json(body),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("Upstream request: {} {}", request.method_name(), request.url);

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&request.url, e))?;

        let status = response.status();

        if !status.is_success() {
            warn!("Upstream {} responded {}", request.url, status);
            // The status is the error; a broken body only shortens the snippet.
            let body = response.text().await.unwrap_or_default();
            return Err(RatesError::UpstreamHttp {
                status: status.as_u16(),
                message: format!(
                    "{} {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    snippet(&body)
                )
                .trim_end()
                .to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&request.url, e))?;

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch and decode the body against `schema`.
    pub async fn fetch_payload(
        &self,
        request: &UpstreamRequest,
        schema: PayloadSchema,
    ) -> Result<UpstreamPayload, RatesError> {
        let response = self.fetch(request).await?;
        UpstreamPayload::decode(schema, &response.body)
    }
}

impl UpstreamRequest {
    fn method_name(&self) -> &'static str {
        match self.method {
            UpstreamMethod::Get => "GET",
            UpstreamMethod::PostJson(_) => "POST",
        }
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> RatesError {
    if err.is_timeout() {
        warn!("Upstream {} timed out", url);
        RatesError::UpstreamTimeout {
            url: url.to_string(),
        }
    } else {
        warn!("Upstream {} unreachable: {}", url, err);
        RatesError::UpstreamUnreachable {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
