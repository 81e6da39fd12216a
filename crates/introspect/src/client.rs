//! HTTP client for executing introspection queries.

use crate::response::response_errors;
use crate::{IntrospectionError, IntrospectionOptions, Result};
use serde_json::Value;
use std::time::Duration;

/// Default timeout for the whole introspection request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A client that sends one introspection query per [`execute`](Self::execute)
/// call.
///
/// There is no retry: a failed request is reported as is.
///
/// # Examples
///
/// ```no_run
/// use shopify_introspect::IntrospectionClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header("X-Shopify-Access-Token", "shpat_123");
/// let body = client
///     .execute("https://acme.myshopify.com/admin/api/2024-01/graphql.json")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    headers: Vec<(String, String)>,
    timeout: Duration,
    connect_timeout: Duration,
    options: IntrospectionOptions,
}

impl Default for IntrospectionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionClient {
    /// Creates a client with a 30 second request timeout, a 10 second
    /// connection timeout, no extra headers and the default query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            options: IntrospectionOptions::default(),
        }
    }

    /// Adds a header to every request. A header with the same name
    /// (case-insensitive) replaces the earlier one.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |client, (name, value)| client.with_header(name, value))
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Selects which optional parts of the introspection query to send.
    #[must_use]
    pub const fn with_options(mut self, options: IntrospectionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sends the introspection query to `url` and returns the parsed body.
    ///
    /// The body is returned whether or not it carries GraphQL `errors`; use
    /// [`crate::check_response`] to gate on them. Non-2xx responses whose
    /// body is JSON with an `errors` field are returned the same way, since
    /// that is how Shopify reports authentication failures.
    ///
    /// # Errors
    ///
    /// - [`IntrospectionError::Network`] if the request could not be sent
    /// - [`IntrospectionError::Http`] for any other non-2xx response
    /// - [`IntrospectionError::Parse`] if a 2xx body is not JSON
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, url: &str) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let query_body = serde_json::json!({
            "query": self.options.query()
        });

        let mut request = client.post(url).header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::info!("Sending introspection query");
        let response = request
            .json(&query_body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(json) = serde_json::from_str::<Value>(&body) {
                if response_errors(&json).is_some() {
                    tracing::warn!(
                        status = status.as_u16(),
                        "Error response carries GraphQL errors"
                    );
                    return Ok(json);
                }
            }
            tracing::error!(status = status.as_u16(), body = %body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse introspection response");
            IntrospectionError::Parse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_default() {
        let client = IntrospectionClient::new();
        assert!(client.headers.is_empty());
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
        assert_eq!(client.options, IntrospectionOptions::default());
    }

    #[test]
    fn test_client_with_headers() {
        let client = IntrospectionClient::new()
            .with_header("X-Shopify-Access-Token", "shpat_123")
            .with_header("X-Request-Id", "abc");

        assert_eq!(
            client.headers,
            vec![
                ("X-Shopify-Access-Token".to_string(), "shpat_123".to_string()),
                ("X-Request-Id".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_later_header_replaces_earlier() {
        let client = IntrospectionClient::new()
            .with_headers([("x-shopify-access-token", "old")])
            .with_header("X-Shopify-Access-Token", "new");

        assert_eq!(client.headers.len(), 1);
        assert_eq!(client.headers[0].1, "new");
    }

    #[test]
    fn test_client_timeouts() {
        let client = IntrospectionClient::new()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout, Duration::from_secs(60));
        assert_eq!(client.connect_timeout, Duration::from_secs(5));
    }
}
