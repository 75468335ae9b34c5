//! Resilient HTTP request execution with retry and timeout.
//!
//! Wraps a request operation with exponential backoff (via [`backon`]) and a per-attempt
//! timeout so that transient network failures and throttling responses are masked
//! automatically. Callers see either a usable response or a terminal error.

use backon::{ExponentialBuilder, Retryable};
use core::time::Duration;
use ohno::{app_err, bail};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

const LOG_TARGET: &str = "     retry";

/// Default timeout for a single request attempt.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum retry attempts (on top of the first request).
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between retries.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry and timeout settings applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries performed after the first attempt fails.
    pub max_retry_attempts: u32,

    /// Delay before the first retry; doubled for each subsequent one.
    pub base_delay: Duration,

    /// Upper bound for a single attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retry_attempts: MAX_RETRY_ATTEMPTS,
            base_delay: RETRY_BASE_DELAY,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_times(self.max_retry_attempts as usize)
    }
}

/// Classify a response status for retry purposes.
fn is_transient(status: StatusCode, headers: &HeaderMap) -> bool {
    // Server errors and rate limiting (429) are transient.
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }

    // Secondary rate limit: 403 carrying Retry-After.
    status == StatusCode::FORBIDDEN && headers.contains_key(RETRY_AFTER)
}

async fn run_attempt<Fut>(name: &str, timeout: Duration, request: Fut) -> crate::Result<reqwest::Response>
where
    Fut: Future<Output = crate::Result<reqwest::Response>>,
{
    let response = tokio::time::timeout(timeout, request)
        .await
        .map_err(|elapsed| app_err!("{name} request timed out after {}s: {elapsed}", timeout.as_secs()))??;

    let status = response.status();
    if is_transient(status, response.headers()) {
        bail!("{name} request failed with HTTP status {status}");
    }

    Ok(response)
}

/// Execute a request with automatic retry and timeout.
///
/// `fetch_fn` is called on each attempt with a clone of `input`. Network errors, timeouts,
/// 5xx, 429 and 403-with-`Retry-After` responses are retried with exponential backoff.
/// Any other response, successful or not, is handed back to the caller untouched.
///
/// `name` identifies the request in log output and error messages.
pub async fn resilient_execute<In, Fut, F>(name: &'static str, policy: RetryPolicy, input: In, fetch_fn: F) -> crate::Result<reqwest::Response>
where
    In: Clone,
    Fut: Future<Output = crate::Result<reqwest::Response>>,
    F: Fn(In) -> Fut,
{
    let attempt = || run_attempt(name, policy.timeout, fetch_fn(input.clone()));

    attempt
        .retry(policy.backoff())
        .notify(|e: &ohno::AppError, delay: Duration| {
            log::debug!(target: LOG_TARGET, "retrying {name} in {}ms: {e}", delay.as_millis());
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_server_errors_are_transient() {
        let headers = HeaderMap::new();
        assert!(is_transient(StatusCode::INTERNAL_SERVER_ERROR, &headers));
        assert!(is_transient(StatusCode::BAD_GATEWAY, &headers));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE, &headers));
    }

    #[test]
    fn test_too_many_requests_is_transient() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new()));
    }

    #[test]
    fn test_forbidden_needs_retry_after() {
        assert!(!is_transient(StatusCode::FORBIDDEN, &HeaderMap::new()));

        let mut headers = HeaderMap::new();
        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert!(is_transient(StatusCode::FORBIDDEN, &headers));
    }

    #[test]
    fn test_client_errors_and_success_are_final() {
        let headers = HeaderMap::new();
        assert!(!is_transient(StatusCode::OK, &headers));
        assert!(!is_transient(StatusCode::UNAUTHORIZED, &headers));
        assert!(!is_transient(StatusCode::NOT_FOUND, &headers));
        assert!(!is_transient(StatusCode::UNPROCESSABLE_ENTITY, &headers));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retry_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.timeout, Duration::from_secs(60));
    }
}
