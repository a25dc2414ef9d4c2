//! # jsonapi-provider
//!
//! A data provider that maps a front end's generic CRUD requests onto a
//! JSON:API REST backend and flattens the responses back into the flat
//! records the front end expects.
//!
//! ## Features
//!
//! - **Closed request dispatch**: the six request kinds are a real enum,
//!   matched exhaustively; unknown wire strings fail before any I/O
//! - **Pure request mapping**: URL, method, headers and body are built with
//!   no network access, so mapping is trivially testable
//! - **Response normalization**: resource objects flatten to `id` +
//!   attributes, with non-null relationship linkages folded in for lists
//! - **Pluggable transport**: one async trait seam over the HTTP exchange,
//!   reqwest-backed in production, recordable in tests
//! - **Explicit settings**: headers and the total-count extractor override
//!   field by field, caller wins
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jsonapi_provider::prelude::*;
//!
//! jsonapi_provider::telemetry::init();
//!
//! let provider = JsonApiProvider::with_settings(
//!     "https://api.example.com",
//!     ProviderSettings::new().header("Authorization", "Bearer ..."),
//! )?;
//!
//! // String surface, as the front end drives it
//! let page = provider.call("GET_LIST", "posts", RequestParams::list(1, 25)).await?;
//! println!("{} of {:?} posts", page.data.as_many().unwrap().len(), page.total);
//!
//! // Typed surface
//! let post = provider.get_one("posts", 42).await?;
//! ```

pub mod config;
pub mod core;
pub mod provider;
pub mod telemetry;
pub mod transport;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::ProviderError,
        request::{Operation, Pagination, RecordId, RequestKind, RequestParams},
        resource::{Document, PrimaryData, Relationship, ResourceObject},
    };

    // === Provider ===
    pub use crate::provider::{
        JsonApiProvider, ProviderResponse,
        mapper::{MappedRequest, map},
        normalize::{NormalizedData, Record, normalize},
    };

    // === Config ===
    pub use crate::config::{JSONAPI_MEDIA_TYPE, ProviderSettings, TotalExtractor};

    // === Transport ===
    pub use crate::transport::{HttpTransport, ReqwestTransport};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde_json::{Map, Value, json};
}
