/// Thin REST client for the Tavily API.
use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;
use super::request::{CrawlRequest, ExtractRequest, MapRequest, SearchRequest};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

const CLIENT_SOURCE: &str = "tavily-cli";

const SEARCH_TIMEOUT_SECS: u64 = 60;
const EXTRACT_TIMEOUT_SECS: u64 = 60;
const CRAWL_TIMEOUT_SECS: u64 = 150;
const USAGE_TIMEOUT_SECS: u64 = 10;

/// Authenticated client. One instance serves a single invocation.
pub struct TavilyClient {
    http: Client,
    base_url: String,
}

impl TavilyClient {
    /// Build a client for `base_url` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Build` if the key is not a valid header value or
    /// the TLS backend cannot be initialised.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| ApiError::Build(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-client-source", HeaderValue::from_static(CLIENT_SOURCE));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("tavily-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// `POST /search`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    pub async fn search(&self, req: &SearchRequest) -> Result<Value, ApiError> {
        self.post_json("/search", req, SEARCH_TIMEOUT_SECS).await
    }

    /// `POST /extract`. The HTTP timeout follows `req.timeout` when set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    pub async fn extract(&self, req: &ExtractRequest) -> Result<Value, ApiError> {
        let secs = timeout_or(req.timeout, EXTRACT_TIMEOUT_SECS);
        self.post_json("/extract", req, secs).await
    }

    /// `POST /crawl`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    pub async fn crawl(&self, req: &CrawlRequest) -> Result<Value, ApiError> {
        let secs = timeout_or(req.scope.timeout, CRAWL_TIMEOUT_SECS);
        self.post_json("/crawl", req, secs).await
    }

    /// `POST /map`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    pub async fn map(&self, req: &MapRequest) -> Result<Value, ApiError> {
        let secs = timeout_or(req.scope.timeout, CRAWL_TIMEOUT_SECS);
        self.post_json("/map", req, secs).await
    }

    /// `GET /usage` with a fixed 10 second timeout. No retry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    pub async fn usage(&self) -> Result<Value, ApiError> {
        let builder = self.http.get(self.url("/usage"));
        self.send("/usage", builder, USAGE_TIMEOUT_SECS).await
    }

    async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        timeout_secs: u64,
    ) -> Result<Value, ApiError> {
        let builder = self.http.post(self.url(endpoint)).json(body);
        self.send(endpoint, builder, timeout_secs).await
    }

    async fn send(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
        timeout_secs: u64,
    ) -> Result<Value, ApiError> {
        let started = Instant::now();
        tracing::debug!(endpoint, timeout_secs, "api.request.start");

        let resp = builder
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, endpoint, timeout_secs))?;

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e, endpoint, timeout_secs))?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), elapsed_ms, "api.request.error");
            return Err(ApiError::from_status(status, &raw));
        }

        tracing::debug!(
            endpoint,
            status = status.as_u16(),
            elapsed_ms,
            bytes = raw.len(),
            "api.request.success"
        );

        serde_json::from_str(&raw).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

/// Whole seconds for an optional fractional timeout, rounded up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn timeout_or(requested: Option<f64>, default_secs: u64) -> u64 {
    requested
        .filter(|s| s.is_finite() && *s > 0.0)
        .map_or(default_secs, |s| s.ceil() as u64)
}
