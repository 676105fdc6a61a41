//! # HTTP Retrieval Utilities
//!
//! A thin asynchronous API client wrapper around `reqwest`, with middleware
//! support for exponential backoff retries and standardized JSON response
//! handling. Non-2xx statuses are reported in-band rather than raised, so
//! callers can decide their own fallback policy.

use reqwest::{header::AUTHORIZATION, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// A standardized container for API responses.
///
/// Wraps the deserialized data along with the HTTP transaction metadata the
/// caller needs to judge the outcome.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// An asynchronous HTTP client bound to one base URL.
///
/// Built on `reqwest_middleware`; handles URL joining, bearer
/// authentication, query parameters and automatic transient-failure retries.
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
    /// An optional Bearer token used for authorization.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Creates a new `ApiClient` with a retry policy and request timeout.
    /// The base URL is taken pre-validated (see
    /// [`crate::configs::RuntimeConfig`]).
    pub fn new(
        base_url: Url,
        auth_token: Option<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let inner_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("CityPulse/0.1")
            .build()
            .unwrap_or_default(); // Fallback to a default client if builder fails.

        let client = ClientBuilder::new(inner_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            inner: client,
            base_url,
            auth_token,
        }
    }

    /// Performs a GET request and handles the response.
    ///
    /// # Errors
    /// Returns an error for URL joining failures, transport-level failures
    /// that survive the retry policy, and 2xx bodies that do not deserialize
    /// into `T`. A non-2xx status is NOT an error: it comes back as an
    /// `ApiResponse` with `success == false`.
    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let full_url = self.base_url.join(path)?;
        let mut req = self.inner.request(Method::GET, full_url);

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(token) = &self.auth_token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response: reqwest::Response = req.send().await?;
        let status = response.status();
        let success = status.is_success();

        if success {
            let data = response.json::<T>().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            // Capture the error body as a string for debugging.
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }
}
