//! HTTP client utilities for RocketShoes.
//!
//! Provides a small builder API over `reqwest` with a base URL, default
//! headers, per-attempt timeouts, and bounded retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_data::{FetchClient, FetchPolicy};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Stock {
//!     id: u64,
//!     amount: i64,
//! }
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//!
//! // Simple GET request
//! let stock: Stock = client
//!     .get("/stock/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! // Shorthand for the same thing
//! let stock: Stock = client.get_json("/stock/1").await?;
//! ```

mod error;
mod request;
mod response;
mod retry;
mod timeout;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use timeout::TimeoutConfig;

use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// HTTP client for making outbound requests.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    policy: FetchPolicy,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with the default policy.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            policy: FetchPolicy::default(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Replace the fetch policy. Rebuilds the connection pool so the
    /// connect timeout takes effect.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Result<Self, FetchError> {
        self.http = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        self.policy = policy;
        Ok(self)
    }

    /// The active fetch policy.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Resolve a path against the base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url.to_string(),
        }
    }

    /// Create a GET request.
    pub fn get(&self, url: impl AsRef<str>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> ClientRequestBuilder {
        let mut builder = RequestBuilder::new(method, self.resolve_url(url.as_ref()));
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            policy: self.policy.clone(),
            builder,
        }
    }

    /// GET a JSON document, failing on non-2xx status.
    pub async fn get_json<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, FetchError> {
        self.get(url)
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    policy: FetchPolicy,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Override the policy for this request only.
    pub fn policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The request as it will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Any status code is returned as a `Response`; call
    /// [`Response::error_for_status`] to turn non-2xx into an error.
    /// Retryable failures are retried according to the policy.
    pub async fn send(self) -> Result<Response, FetchError> {
        let retry = &self.policy.retry;
        let total = self.policy.timeout.total;
        let mut attempt = 0u32;

        loop {
            tracing::debug!(
                method = self.builder.method.as_str(),
                url = %self.builder.url,
                attempt,
                "sending request"
            );

            let outcome = self
                .builder
                .to_reqwest(&self.http)
                .timeout(total)
                .send()
                .await;

            match outcome {
                Ok(resp) => {
                    let response = Response::from_reqwest(resp).await?;
                    if !retry.should_retry_status(response.status, attempt) {
                        return Ok(response);
                    }
                    tracing::warn!(url = %self.builder.url, status = response.status, attempt, "retrying request");
                }
                Err(e) => {
                    let err = classify(e, total);
                    let retryable = match &err {
                        FetchError::Timeout(_) => retry.should_retry_timeout(attempt),
                        FetchError::ConnectionError(_) => retry.should_retry_connection(attempt),
                        _ => false,
                    };
                    if !retryable {
                        return Err(err);
                    }
                    tracing::warn!(url = %self.builder.url, error = %err, attempt, "retrying request");
                }
            }

            let delay = retry.backoff.delay_for_attempt(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}

fn classify(e: reqwest::Error, total: std::time::Duration) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(total)
    } else if e.is_connect() {
        FetchError::ConnectionError(e.to_string())
    } else if e.is_builder() {
        FetchError::InvalidUrl(e.to_string())
    } else {
        FetchError::RequestError(e.to_string())
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, FetchPolicy, Method, Response, RetryPolicy, TimeoutConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_joins_slashes() {
        let client = FetchClient::new().with_base_url("http://localhost:3333/");
        assert_eq!(client.resolve_url("/stock/1"), "http://localhost:3333/stock/1");
        assert_eq!(client.resolve_url("products/2"), "http://localhost:3333/products/2");
    }

    #[test]
    fn test_resolve_url_absolute_passthrough() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        assert_eq!(client.resolve_url("https://cdn.example.com/a"), "https://cdn.example.com/a");
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = FetchClient::new()
            .with_base_url("http://api")
            .with_default_header("X-Client", "rocketshoes");

        let request = client.get("/stock/1").bearer_auth("t");
        assert_eq!(request.request().url(), "http://api/stock/1");
        assert_eq!(request.request().header_value("x-client"), Some("rocketshoes"));
        assert_eq!(request.request().header_value("Authorization"), Some("Bearer t"));
    }

    #[test]
    fn test_with_policy() {
        let policy = FetchPolicy::new(
            TimeoutConfig::from_total(std::time::Duration::from_secs(2)),
            RetryPolicy::none(),
        );
        let client = FetchClient::new().with_policy(policy.clone()).unwrap();
        assert_eq!(client.policy(), &policy);
    }
}
