//! HTTP transport seam
//!
//! The provider issues exactly one request per call through the
//! [`HttpTransport`] trait. Production code uses [`ReqwestTransport`]; tests
//! inject recording doubles to observe (or suppress) the exchange.

use crate::core::error::ProviderError;
use crate::provider::mapper::MappedRequest;
use async_trait::async_trait;
use serde_json::Value;

/// One outbound HTTP exchange
///
/// Implementations return the decoded JSON body of a successful response,
/// `Value::Null` for an empty body, and surface every transport-level failure
/// (network error, non-2xx status) unmodified. No timeout, cancellation or
/// retry policy lives behind this trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &MappedRequest) -> Result<Value, ProviderError>;
}

/// Transport backed by a shared [`reqwest::Client`]
///
/// The client keeps a cookie store so session cookies ride along on every
/// request, which is what the credentials flag on [`MappedRequest`] asks for.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a cookie-bearing client
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client })
    }

    /// Wrap an already-configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &MappedRequest) -> Result<Value, ProviderError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?.error_for_status()?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            // Deletes commonly answer 204 with no body
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(ProviderError::MalformedResponse)
    }
}
