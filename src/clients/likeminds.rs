use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Serialize;
use serde_json::Value as J;
use thiserror::Error;

use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::{make_http_client, UPSTREAM_TIMEOUT};

pub const QUERY_PATH: &str = "/ai-agent/query";
pub const FLUTTER_PATH: &str = "/api/ai-query";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid JSON response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the LikeMinds AI agent API. One attempt per call, no retries.
#[derive(Clone)]
pub struct LikeMindsClient {
    base: String,
    http: Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct QueryReq<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

#[derive(Serialize)]
struct FlutterReq<'a> {
    user_query: &'a str,
}

impl LikeMindsClient {
    pub fn new(base: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_timeout(base, UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(base: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = make_http_client(timeout).map_err(UpstreamError::Build)?;
        let base = base.into();
        tracing::info!(base_url = %base, "LikeMindsClient configured");
        Ok(Self { base, http, timeout })
    }

    /// POST `payload` as JSON to `base + path` and decode the JSON reply.
    pub async fn post<P: Serialize + ?Sized>(&self, path: &str, payload: &P) -> Result<J, UpstreamError> {
        let url = format!("{}{}", self.base, path);
        let (builder, rid) = add_standard_headers(self.http.post(&url), None);
        tracing::info!(endpoint = %url, request_id = %rid, "upstream POST");

        let start = Instant::now();
        let resp = builder.json(payload).send().await.map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %url, status = status.as_u16(), "upstream returned error status");
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }
        let out = resp.json::<J>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout)
            } else {
                UpstreamError::Decode(e)
            }
        })?;
        tracing::debug!(
            endpoint = %url,
            latency_ms = start.elapsed().as_millis() as u64,
            "upstream POST completed"
        );
        Ok(out)
    }

    pub async fn query_ai_agent(&self, query: &str, context: Option<&str>) -> Result<J, UpstreamError> {
        self.post(QUERY_PATH, &QueryReq { query, context }).await
    }

    pub async fn generate_flutter_code(&self, user_query: &str) -> Result<J, UpstreamError> {
        self.post(FLUTTER_PATH, &FlutterReq { user_query }).await
    }

    fn classify(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(e)
        }
    }
}
