//! Request dispatch: one HTTP round trip with an explicit `Host` header.
//!
//! Node HTTP servers reject a `Host` header that includes a port, which is
//! what the network layer synthesizes from a URL like
//! `http://node.example:8888`. The dispatcher therefore resolves a bare
//! hostname once per target and sets the header itself on every request.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HOST, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{Error, Result};

/// Status, headers and body of a completed round trip, uninterpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Resolve the `Host` header value for a target.
///
/// A non-empty override wins. Otherwise the hostname of `base_url` is used
/// with any port stripped.
pub fn resolve_host(base_url: &Url, host_override: Option<&str>) -> Result<String> {
    if let Some(host) = host_override.filter(|h| !h.is_empty()) {
        return Ok(host.to_string());
    }
    base_url
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| Error::MissingHost(base_url.to_string()))
}

/// Sends requests to one target. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    base_url: Url,
    host: String,
    host_header: HeaderValue,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher, resolving the host header up front.
    pub fn new(
        http: reqwest::Client,
        mut base_url: Url,
        host_override: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let host = resolve_host(&base_url, host_override)?;
        let host_header = match HeaderValue::from_str(&host) {
            Ok(value) => value,
            Err(_) => return Err(Error::InvalidHost(host)),
        };

        // Keep any path prefix of the base URL when joining endpoint paths
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            http,
            base_url,
            host,
            host_header,
            timeout,
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The `Host` header value sent with every request.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the full URL for an endpoint path.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::from)
    }

    /// Perform one request and collect the whole response.
    ///
    /// Resolves with [`Error::Cancelled`] as soon as `cancel` fires, even if
    /// the transport has not finished; the in-flight exchange is dropped.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let url = self.url(path)?;
        tracing::debug!(%method, %url, host = self.host(), "sending request");

        let mut request = self
            .http
            .request(method, url)
            .header(HOST, self.host_header.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                headers,
                body,
            })
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(path, "request cancelled");
                Err(Error::Cancelled)
            }
            result = exchange => {
                let response = result?;
                tracing::trace!(
                    path,
                    status = response.status.as_u16(),
                    bytes = response.body.len(),
                    "received response"
                );
                Ok(response)
            }
        }
    }
}
