//! GitHub API client
//!
//! Minimal transport for the GraphQL endpoint and the commit search endpoint. Every request
//! goes through the resilient executor; callers never retry on their own.

use crate::Result;
use crate::facts::resilient_http::{RetryPolicy, resilient_execute};
use crate::facts::hosting::types::GraphQlResponse;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "    client";

/// Public GitHub API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Media type that unlocks the commit search endpoint.
const COMMIT_SEARCH_MEDIA_TYPE: &str = "application/vnd.github.cloak-preview";

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl Client {
    /// Create a new client with an optional authentication token and API root.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder().user_agent("github-stats");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        let base_url: String = base_url.into();

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a GraphQL document and decode its `{data, errors}` envelope.
    ///
    /// Platform-level errors are part of the returned envelope, not an `Err`.
    pub async fn graphql<V, T>(&self, query: &'static str, variables: &V) -> Result<GraphQlResponse<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/graphql", self.base_url);
        let body = serde_json::json!({ "query": query, "variables": variables });
        let client = self.client.clone();

        let resp = resilient_execute("graphql", self.retry, body, move |body: serde_json::Value| {
            let request = client.post(&url).json(&body);
            async move { request.send().await.map_err(ohno::AppError::from) }
        })
        .await?;

        log_rate_limit(resp.headers());

        resp.error_for_status()
            .into_app_err("GitHub rejected the GraphQL request")?
            .json()
            .await
            .into_app_err("could not decode GitHub GraphQL response")
    }

    /// Search commits authored by `login` and return the raw JSON body.
    pub async fn search_commits(&self, login: &str) -> Result<serde_json::Value> {
        let url = format!("{}/search/commits?q=author:{login}", self.base_url);
        let client = self.client.clone();

        let resp = resilient_execute("commit search", self.retry, url, move |url: String| {
            let request = client.get(&url).header(ACCEPT, COMMIT_SEARCH_MEDIA_TYPE);
            async move { request.send().await.map_err(ohno::AppError::from) }
        })
        .await?;

        log_rate_limit(resp.headers());

        resp.error_for_status()
            .into_app_err_with(|| format!("GitHub rejected the commit search for '{login}'"))?
            .json()
            .await
            .into_app_err_with(|| format!("could not decode commit search response for '{login}'"))
    }
}

fn log_rate_limit(headers: &HeaderMap) {
    if let Some(info) = extract_rate_limit_from_headers(headers) {
        log::debug!(target: LOG_TARGET, "GitHub rate limit: remaining={}, reset={}", info.remaining, info.reset_at);
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
