//! Shared HTTP client
//!
//! Every request carries the configured timeout. `send` retries transport
//! failures and 5xx responses with exponential backoff and is meant for
//! idempotent reads; `send_once` makes exactly one attempt and is used for
//! writes.

use std::time::Duration;

use opsboard_domain::constants::{DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS};
use opsboard_domain::{BackendConfig, OpsBoardError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("opsboard/", env!("CARGO_PKG_VERSION"));

/// Longest doubling applied to the base backoff (base * 2^6).
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

/// How many times a read is tried and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RetryPolicy {
    attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    const SINGLE: Self = Self { attempts: 1, base_backoff: Duration::ZERO };

    /// Wait before retry number `retry` (1-based).
    fn delay_before(self, retry: usize) -> Duration {
        let doublings = u32::try_from(retry.saturating_sub(1))
            .unwrap_or(u32::MAX)
            .min(MAX_BACKOFF_DOUBLINGS);
        self.base_backoff.saturating_mul(1 << doublings)
    }
}

/// What one attempt produced
enum Attempt {
    Done(Response),
    Transient(Response),
    Failed(reqwest::Error),
}

/// Backend HTTP client: timeout, `apikey` header and retrying reads.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client using the backend timeout and attempt budget. The anon key is
    /// sent as `apikey` on every request.
    pub fn from_config(config: &BackendConfig) -> Result<Self, OpsBoardError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .api_key(&config.anon_key)
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a read, retrying 5xx answers and transport failures.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, OpsBoardError> {
        self.send_with(builder, self.retry).await
    }

    /// Send a write. Exactly one attempt is made whatever the outcome.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, OpsBoardError> {
        self.send_with(builder, RetryPolicy::SINGLE).await
    }

    async fn send_with(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, OpsBoardError> {
        let mut retry = 0;
        loop {
            let request = build_attempt(&builder)?;
            let last = retry + 1 >= policy.attempts;
            let (method, url) = (request.method().clone(), request.url().clone());

            match self.attempt(request).await {
                Attempt::Done(response) => return Ok(response),
                Attempt::Transient(response) if last => return Ok(response),
                Attempt::Failed(err) if last || !is_transient(&err) => {
                    return Err(InfraError::from(err).into());
                }
                Attempt::Transient(_) | Attempt::Failed(_) => {
                    retry += 1;
                    let delay = policy.delay_before(retry);
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    warn!(%method, %url, retry, delay_ms, "retrying backend request");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }

    async fn attempt(&self, request: Request) -> Attempt {
        let (method, url) = (request.method().clone(), request.url().clone());
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "backend responded");
                if status.is_server_error() {
                    Attempt::Transient(response)
                } else {
                    Attempt::Done(response)
                }
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "backend request failed");
                Attempt::Failed(err)
            }
        }
    }
}

/// Requests are rebuilt for every attempt, so their bodies must be buffered.
fn build_attempt(builder: &RequestBuilder) -> Result<Request, OpsBoardError> {
    let copy = builder.try_clone().ok_or_else(|| {
        OpsBoardError::Internal("streaming request bodies cannot be sent to the backend".into())
    })?;
    copy.build().map_err(|err| InfraError::from(err).into())
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    api_key: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            retry: RetryPolicy {
                attempts: DEFAULT_HTTP_MAX_ATTEMPTS,
                base_backoff: Duration::from_millis(250),
            },
            api_key: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts for reads, the first one included.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, OpsBoardError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = self.api_key {
            let value = HeaderValue::from_str(&key).map_err(|_| {
                OpsBoardError::Config("anon key is not a valid header value".into())
            })?;
            headers.insert("apikey", value);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .no_proxy()
            .build()
            .map_err(|err| OpsBoardError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, retry: self.retry })
    }
}
