//! ImageFetcher - downloads remote source images.

use std::time::Duration;

use super::error::AcquisitionError;
use super::retry::{
    calculate_backoff, is_transient_network_error, is_transient_status, parse_retry_after,
    DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX, DEFAULT_NETWORK_RETRIES,
};

/// Default timeout for HTTP requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a single attempt that did not produce a body.
enum FetchFailure {
    /// Worth retrying; carries the server's Retry-After if it sent one.
    Transient {
        message: String,
        retry_after: Option<Duration>,
    },
    Fatal(AcquisitionError),
}

/// HTTP client for source images with retry on transient failures.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http_client: reqwest::Client,
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl ImageFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AcquisitionError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .user_agent(concat!("codeblocks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            max_attempts: DEFAULT_NETWORK_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
            backoff_max: DEFAULT_BACKOFF_MAX,
        })
    }

    /// Override the retry policy. `max_attempts` is clamped to at least 1.
    pub fn with_retry_config(mut self, max_attempts: u32, base: Duration, max: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_base = base;
        self.backoff_max = max;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Download `url` into memory.
    ///
    /// Connection failures, timeouts, interrupted bodies and 502/503/504
    /// responses are retried with exponential backoff. Any other non-success
    /// status fails immediately with [`AcquisitionError::Status`].
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError::Network` once all attempts are used up.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.fetch_once(url).await {
                Ok(bytes) => {
                    log::debug!("Fetched {} bytes from {}", bytes.len(), url);
                    return Ok(bytes);
                }
                Err(FetchFailure::Transient {
                    message,
                    retry_after,
                }) => {
                    if attempt >= self.max_attempts {
                        return Err(AcquisitionError::Network {
                            message,
                            attempts: attempt,
                        });
                    }

                    let delay = retry_after
                        .unwrap_or_else(|| {
                            calculate_backoff(attempt - 1, self.backoff_base, self.backoff_max)
                        })
                        .min(self.backoff_max);
                    log::warn!(
                        "Fetching {} failed ({}), retrying in {:?} (attempt {}/{})",
                        url,
                        message,
                        delay,
                        attempt + 1,
                        self.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(FetchFailure::Fatal(error)) => return Err(error),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            if is_transient_status(status.as_u16()) {
                return Err(FetchFailure::Transient {
                    message: format!("server returned {}", status),
                    retry_after: parse_retry_after(&response),
                });
            }
            return Err(FetchFailure::Fatal(AcquisitionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let bytes = response.bytes().await.map_err(classify)?;
        Ok(bytes.to_vec())
    }
}

fn classify(error: reqwest::Error) -> FetchFailure {
    if is_transient_network_error(&error) {
        FetchFailure::Transient {
            message: error.to_string(),
            retry_after: None,
        }
    } else {
        FetchFailure::Fatal(AcquisitionError::Http(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_retry_policy() {
        let fetcher = ImageFetcher::new(DEFAULT_TIMEOUT).unwrap();
        assert_eq!(fetcher.max_attempts(), DEFAULT_NETWORK_RETRIES);
    }

    #[test]
    fn test_retry_config_clamps_attempts() {
        let fetcher = ImageFetcher::new(DEFAULT_TIMEOUT)
            .unwrap()
            .with_retry_config(0, Duration::ZERO, Duration::ZERO);
        assert_eq!(fetcher.max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_host_reports_network_error() {
        let fetcher = ImageFetcher::new(Duration::from_secs(2))
            .unwrap()
            .with_retry_config(2, Duration::ZERO, Duration::ZERO);
        let result = fetcher.fetch("http://127.0.0.1:9/image.png").await;
        assert!(
            matches!(result, Err(AcquisitionError::Network { attempts: 2, .. })),
            "{:?}",
            result
        );
    }
}
