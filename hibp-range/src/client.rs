use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, USER_AGENT};
use http::StatusCode;
use reqwest::Url;
use tracing::{debug, trace};

use crate::config::{RangeClientConfig, parse_base_url};
use crate::error::{BoxError, CheckError, ConfigError};

/// Header asking the range API to pad its response with decoy entries, so the
/// response size does not reveal whether the suffix is present.
pub const ADD_PADDING_HEADER: &str = "add-padding";

/// A fully built range request, handed to a [`RangeTransport`].
#[derive(Debug, Clone)]
pub struct RangeRequest {
    pub url: Url,
    pub headers: HeaderMap,
}

/// Whatever the range API answered, before status classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Failure to get any HTTP response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),
}

/// Sends a single GET and returns the raw response.
///
/// Implementations own their connection handling (pooling, keep-alive, TLS).
/// They must not retry.
pub trait RangeTransport: Send + Sync {
    fn send(
        &self,
        request: RangeRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// [`RangeTransport`] backed by a `reqwest::Client` and its keep-alive pool.
///
/// Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &RangeClientConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .tcp_keepalive(Duration::from_secs(60))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one shared with the rest of an application.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RangeTransport for ReqwestTransport {
    async fn send(&self, request: RangeRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(request.url)
            .headers(request.headers)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::from_reqwest)?;

        Ok(RawResponse { status, headers, body })
    }
}

impl TransportError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() { TransportError::Timeout } else { TransportError::Connection(e.into()) }
    }
}

/// Issues range queries: one GET to `<base>/range/<prefix>` per call.
pub struct RangeQueryClient<T = ReqwestTransport> {
    transport: T,
    base_url: Url,
    user_agent: Option<HeaderValue>,
}

impl RangeQueryClient<ReqwestTransport> {
    /// Builds a reqwest-backed client with its own connection pool.
    pub fn from_config(config: &RangeClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config)?;
        let mut client = Self::new(transport, config.base_url.as_str())?;
        if let Some(agent) = &config.user_agent {
            let agent = HeaderValue::from_str(agent).map_err(|e| ConfigError::InvalidUserAgent {
                value: agent.clone(),
                reason: e.to_string(),
            })?;
            client = client.with_user_agent(agent);
        }
        Ok(client)
    }
}

impl<T: RangeTransport> RangeQueryClient<T> {
    pub fn new(transport: T, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { transport, base_url: parse_base_url(base_url)?, user_agent: None })
    }

    /// Sets the `User-Agent` sent when a query does not supply its own.
    pub fn with_user_agent(mut self, user_agent: HeaderValue) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `<base>/range/<prefix>`, with the prefix pushed as an encoded path segment.
    pub fn range_url(&self, prefix: &str) -> Url {
        let mut url = self.base_url.clone();
        // base_url is checked to be hierarchical on construction
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("range").push(prefix);
        }
        url
    }

    /// Queries the range for `prefix` and returns the body of a 2xx response.
    ///
    /// The request is dropped, and so cancelled, once `timeout` elapses.
    /// Non-2xx responses become [`CheckError::Status`]. Nothing is retried.
    pub async fn query(
        &self,
        prefix: &str,
        timeout: Duration,
        user_agent: Option<&HeaderValue>,
    ) -> Result<RawResponse, CheckError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(ADD_PADDING_HEADER, HeaderValue::from_static("true"));
        if let Some(agent) = user_agent.or(self.user_agent.as_ref()) {
            headers.insert(USER_AGENT, agent.clone());
        }

        let request = RangeRequest { url: self.range_url(prefix), headers };
        trace!(url = %request.url, "sending range query");

        let raw = match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Err(_elapsed) => return Err(CheckError::Timeout { timeout }),
            Ok(Err(TransportError::Timeout)) => return Err(CheckError::Timeout { timeout }),
            Ok(Err(TransportError::Connection(source))) => {
                return Err(CheckError::Transport { source });
            }
            Ok(Ok(raw)) => raw,
        };

        debug!(status = raw.status.as_u16(), bytes = raw.body.len(), "range query answered");

        if !raw.status.is_success() {
            return Err(CheckError::Status {
                status: raw.status,
                headers: raw.headers,
                body: raw.body,
            });
        }

        Ok(raw)
    }
}
