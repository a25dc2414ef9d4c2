//! Typed error handling for the provider
//!
//! Every failure a provider call can produce is captured in [`ProviderError`]
//! so embedders can match specific cases rather than dealing with a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ProviderError::UnsupportedRequestKind`]: the request kind is not one of
//!   the six recognized values; raised before any I/O
//! - [`ProviderError::MissingParameter`]: the parameters do not fit the
//!   request kind; raised before any I/O
//! - [`ProviderError::Transport`]: the underlying HTTP exchange failed
//!   (network failure or non-2xx status); propagated unmodified, never retried
//! - [`ProviderError::MalformedResponse`]: a successful response body does not
//!   decode into the expected JSON:API shape
//!
//! # Example
//!
//! ```rust,ignore
//! match provider.call("GET_UNKNOWN", "posts", params).await {
//!     Err(ProviderError::UnsupportedRequestKind { kind }) => {
//!         eprintln!("unknown request kind: {kind}");
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use crate::core::request::RequestKind;
use thiserror::Error;

/// The error type for all provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request kind is not one of the six recognized values
    #[error("unsupported data provider request kind `{kind}`")]
    UnsupportedRequestKind {
        /// The offending kind value, kept for diagnostics
        kind: String,
    },

    /// The parameters are missing a member the request kind requires
    #[error("request kind {kind} requires the `{field}` parameter")]
    MissingParameter {
        kind: RequestKind,
        field: &'static str,
    },

    /// Failure of the underlying HTTP exchange
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body is not a well-formed JSON:API document
    #[error("malformed JSON:API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl ProviderError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::UnsupportedRequestKind { .. } => "UNSUPPORTED_REQUEST_KIND",
            ProviderError::MissingParameter { .. } => "MISSING_PARAMETER",
            ProviderError::Transport(_) => "TRANSPORT_ERROR",
            ProviderError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }

    /// Whether the error was raised before any network I/O was attempted
    pub fn is_pre_transport(&self) -> bool {
        matches!(
            self,
            ProviderError::UnsupportedRequestKind { .. } | ProviderError::MissingParameter { .. }
        )
    }
}
