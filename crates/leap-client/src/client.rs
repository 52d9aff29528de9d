//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::{ChainApi, HealthApi};
use crate::classify::classify;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::types::{Health, Info};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Node status API client.
///
/// Cheap to clone; clones share one connection pool and one immutable
/// target. Every call performs exactly one request attempt.
///
/// # Example
///
/// ```no_run
/// use leap_client::{CancellationToken, LeapClient};
///
/// # async fn example() -> leap_client::Result<()> {
/// let client = LeapClient::builder()
///     .base_url("http://localhost:8888")
///     .build()?;
///
/// let info = client.get_info(&CancellationToken::new()).await?;
/// println!("head block: {}", info.head_block_num);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LeapClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    pub(crate) dispatcher: Dispatcher,
}

impl LeapClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        self.inner.dispatcher.base_url()
    }

    /// Get the `Host` header value sent with every request.
    pub fn host(&self) -> &str {
        self.inner.dispatcher.host()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the chain API.
    pub fn chain(&self) -> ChainApi {
        ChainApi::new(self.clone())
    }

    /// Access the health API.
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    /// Fetch `/v1/chain/get_info`.
    pub async fn get_info(&self, cancel: &CancellationToken) -> Result<Info> {
        self.chain().get_info(cancel).await
    }

    /// Fetch `/v2/health`.
    pub async fn get_health(&self, cancel: &CancellationToken) -> Result<Health> {
        self.health().get_health(cancel).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Make a GET request, classify the response and decode a success body.
    ///
    /// Returns the decoded value together with the response status.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<(T, u16)> {
        let response = self
            .inner
            .dispatcher
            .send(Method::GET, path, cancel)
            .await?;
        let status = response.status.as_u16();
        let body = classify(response.status, response.body).into_result()?;
        Ok((serde_json::from_slice(&body)?, status))
    }
}

/// Builder for creating a LeapClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    host: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            host: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: None,
        }
    }

    /// Set the base URL of the node (scheme, host, optional port and path prefix).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the `Host` header. An empty string keeps the derived host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the request timeout, or `None` to wait indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    ///
    /// Parses the base URL and resolves the `Host` header; both fail here,
    /// before any request is made.
    pub fn build(self) -> Result<LeapClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let base_url = Url::parse(&base_url)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("leap-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        let dispatcher = Dispatcher::new(http, base_url, self.host.as_deref(), self.timeout)?;

        Ok(LeapClient {
            inner: Arc::new(ClientInner { dispatcher }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_with_base_url() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8888")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8888/");
        assert_eq!(client.host(), "localhost");
    }

    #[test]
    fn test_builder_host_override() {
        let client = ClientBuilder::new()
            .base_url("https://10.1.2.3:8443")
            .host("eos.example.com")
            .build()
            .unwrap();

        assert_eq!(client.host(), "eos.example.com");
    }

    #[test]
    fn test_builder_empty_host_override_derives() {
        let client = ClientBuilder::new()
            .base_url("http://node.example.com:8888")
            .host("")
            .build()
            .unwrap();

        assert_eq!(client.host(), "node.example.com");
    }

    #[test]
    fn test_builder_rejects_control_characters() {
        for raw in ["http://exa mple.com:8888", "http://local\u{0}host:8888"] {
            let err = ClientBuilder::new().base_url(raw).build().err().unwrap();
            assert!(err.is_parse_error(), "{raw}: {err}");
            assert!(!err.is_transport());
        }
    }

    #[test]
    fn test_new_is_builder_shorthand() {
        let client = LeapClient::new("http://127.0.0.1:8888/prefix").unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8888/prefix/");
    }
}
