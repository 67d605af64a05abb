//! HTTP client wrapper with retry logic.

use crate::error::{CloudError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Wait before retry `attempt` (1-based): 100 ms doubling per attempt,
/// capped at [`MAX_BACKOFF`].
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor)).min(MAX_BACKOFF)
}

/// HTTP client for fetching whole response bodies.
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(request_timeout: Duration, max_retries: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("vegwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            max_retries,
            request_timeout,
        })
    }

    /// GET `url` and return the body bytes.
    ///
    /// Non-success statuses become errors. A 404 is reported as
    /// [`CloudError::NotFound`] rather than a network failure.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let resp = self.execute_with_retry(self.client.get(url)).await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CloudError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(CloudError::Network(format!(
                "HTTP {} fetching {}",
                status, url
            )));
        }

        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Execute a request with exponential backoff retry.
    ///
    /// Timeouts, connection failures and 5xx responses are retried.
    async fn execute_with_retry(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }

            let Some(cloned) = request.try_clone() else {
                return Ok(request.send().await?);
            };

            match cloned.send().await {
                Ok(resp) if resp.status().is_server_error() => {
                    warn!("attempt {}: server returned {}", attempt + 1, resp.status());
                    last_err = Some(CloudError::Network(format!("HTTP {}", resp.status())));
                }
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_timeout() || e.is_connect() => {
                    warn!("attempt {}: {}", attempt + 1, e);
                    last_err = Some(CloudError::Http(e));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_err.unwrap_or_else(|| CloudError::Network("no attempts made".into())))
    }

    /// Getter for the timeout duration.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
