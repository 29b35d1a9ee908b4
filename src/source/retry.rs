//! Retry and backoff helpers for fetching remote images.

use std::time::Duration;

use rand::Rng;

/// Default number of attempts for transient network failures.
pub const DEFAULT_NETWORK_RETRIES: u32 = 3;

/// Base delay for exponential backoff (500 milliseconds).
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Maximum delay cap for exponential backoff (10 seconds).
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(10);

/// Determine if a reqwest error is a transient network error that should be retried.
///
/// Returns true for connection errors, timeouts and interrupted bodies.
pub fn is_transient_network_error(error: &reqwest::Error) -> bool {
    if error.is_connect() || error.is_timeout() || error.is_body() {
        return true;
    }

    error
        .status()
        .is_some_and(|status| is_transient_status(status.as_u16()))
}

/// 502 Bad Gateway, 503 Service Unavailable and 504 Gateway Timeout are
/// usually temporary.
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 502..=504)
}

/// Parse the Retry-After header as whole seconds.
pub fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Calculate exponential backoff delay with random jitter.
///
/// Uses the formula: min(base * 2^attempt + jitter, max_delay)
/// where jitter is drawn uniformly from zero to half the base, and never
/// exceeds 500ms.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter_cap_ms = (base.as_millis() as u64).min(1000) / 2;
    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_cap_ms));
    exponential.saturating_add(jitter).min(max)
}
