//! Shared HTTP plumbing for quote adapters.
//!
//! One GET-and-decode helper with bounded retry on connect and timeout
//! errors. Non-success statuses are never retried.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::warn;
use url::Url;

use crate::error::{Result, UpstreamError};

/// HTTP client configuration shared by the upstream adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3000
}

const fn default_retry_max_attempts() -> u32 {
    2
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// `reqwest` client with the retry policy applied.
#[derive(Debug, Clone)]
pub struct RetryingClient {
    http: HttpClient,
    provider: &'static str,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl RetryingClient {
    #[must_use]
    pub fn new(provider: &'static str, settings: &HttpSettings) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(provider, error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            provider,
            retry_max_attempts: settings.retry_max_attempts,
            retry_backoff_ms: settings.retry_backoff_ms,
        }
    }

    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    // Query strings carry API keys.
                    let err = err.without_url();
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    let err = err.without_url();
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            if !status.is_success() {
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body: truncate(&body, 200),
                }
                .into());
            }

            return decode(self.provider, &body);
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            provider = self.provider,
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

/// Decode a JSON body, reporting failures against `provider`.
pub(crate) fn decode<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| {
        UpstreamError::Decode {
            provider,
            reason: err.to_string(),
        }
        .into()
    })
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_retry_once_more() {
        let settings = HttpSettings::default();
        assert_eq!(settings.retry_max_attempts, 2);
        assert_eq!(settings.timeout_ms, 10_000);
    }

    #[test]
    fn decode_failure_names_provider() {
        let err = decode::<Vec<u32>>("the-odds-api", "{not json").unwrap_err();
        match err {
            Error::Upstream(UpstreamError::Decode { provider, .. }) => {
                assert_eq!(provider, "the-odds-api");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(300);
        let short = truncate(&body, 200);
        assert_eq!(short.chars().count(), 201);
        assert_eq!(truncate("short", 200), "short");
    }
}
