//! The provider: request dispatch, the single HTTP exchange, and per-kind
//! response assembly
//!
//! A [`JsonApiProvider`] is constructed once per base URL and settings object,
//! then handles any number of independent calls. Each call maps the request,
//! awaits one transport exchange, and assembles the response for its kind.

pub mod mapper;
pub mod normalize;

use crate::config::ProviderSettings;
use crate::core::error::ProviderError;
use crate::core::request::{Operation, RecordId, RequestKind, RequestParams};
use crate::core::resource::{Document, PrimaryData};
use normalize::{NormalizedData, Record};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::transport::{HttpTransport, ReqwestTransport};

/// What a provider call hands back to the front end
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub data: NormalizedData,

    /// Total record count, present for list responses only
    pub total: Option<u64>,
}

/// A data provider bound to one JSON:API base URL
///
/// Cheap to clone and safe to share; calls are independent and may be issued
/// concurrently by the embedding application.
///
/// # Example
/// ```rust,ignore
/// let provider = JsonApiProvider::new("https://api.example.com")?;
/// let response = provider
///     .call("GET_LIST", "posts", RequestParams::list(1, 25))
///     .await?;
/// ```
#[derive(Clone)]
pub struct JsonApiProvider {
    base_url: String,
    settings: ProviderSettings,
    transport: Arc<dyn HttpTransport>,
}

impl JsonApiProvider {
    /// Provider with default settings and a reqwest-backed transport
    pub fn new(api_url: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_settings(api_url, ProviderSettings::default())
    }

    /// Provider with caller settings and a reqwest-backed transport
    pub fn with_settings(
        api_url: impl Into<String>,
        settings: ProviderSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self::with_transport(
            api_url,
            settings,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Provider with an injected transport; the testing seam
    pub fn with_transport(
        api_url: impl Into<String>,
        settings: ProviderSettings,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: api_url.into(),
            settings,
            transport,
        }
    }

    /// Handle a front-end request given by its wire kind string
    ///
    /// Unknown kinds and missing parameters fail before the transport is
    /// touched; transport failures propagate unmodified.
    pub async fn call(
        &self,
        kind: &str,
        resource: &str,
        params: RequestParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let kind = RequestKind::parse(kind)?;
        let operation = Operation::from_params(kind, params)?;
        self.execute(&operation, resource).await
    }

    /// Handle an already-typed operation
    pub async fn execute(
        &self,
        operation: &Operation,
        resource: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = mapper::map(operation, resource, &self.base_url, &self.settings);
        debug!(
            kind = %operation.kind(),
            method = %request.method,
            url = %request.url,
            "dispatching request"
        );

        let payload = self.transport.execute(&request).await?;
        self.assemble(operation, payload)
    }

    /// Paginated list of a resource
    pub async fn get_list(
        &self,
        resource: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(
            &Operation::ListAll {
                pagination: crate::core::request::Pagination { page, per_page },
            },
            resource,
        )
        .await
    }

    /// Fetch one record by id
    pub async fn get_one(
        &self,
        resource: &str,
        id: impl Into<RecordId>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(&Operation::GetOne { id: id.into() }, resource).await
    }

    /// Create a record from a flat field map
    pub async fn create(
        &self,
        resource: &str,
        data: Map<String, Value>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(&Operation::Create { data }, resource).await
    }

    /// Update a record by id from a flat field map
    pub async fn update(
        &self,
        resource: &str,
        id: impl Into<RecordId>,
        data: Map<String, Value>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(&Operation::Update { id: id.into(), data }, resource)
            .await
    }

    /// Delete a record by id; the response echoes the id back
    pub async fn delete(
        &self,
        resource: &str,
        id: impl Into<RecordId>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(&Operation::Delete { id: id.into() }, resource).await
    }

    /// Fetch records by id list
    ///
    /// The request is mapped and issued, but there is no assembly rule for
    /// id-filter responses: the call always ends in
    /// [`ProviderError::UnsupportedRequestKind`] after the exchange.
    pub async fn get_many(
        &self,
        resource: &str,
        ids: Vec<RecordId>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(&Operation::GetMany { ids }, resource).await
    }

    /// Per-kind response assembly
    ///
    /// List responses run full normalization (relationships folded in) and
    /// read the total from `meta`. Single-record responses surface only `id`
    /// and attributes. Delete echoes the request id and ignores the body.
    fn assemble(
        &self,
        operation: &Operation,
        payload: Value,
    ) -> Result<ProviderResponse, ProviderError> {
        match operation {
            Operation::ListAll { .. } => {
                let document: Document = serde_json::from_value(payload)?;
                let total = self.settings.total_from(&document.meta);
                Ok(ProviderResponse {
                    data: normalize::normalize(document.data),
                    total,
                })
            }

            Operation::GetOne { .. } | Operation::Create { .. } | Operation::Update { .. } => {
                let document: Document = serde_json::from_value(payload)?;
                let resource = match document.data {
                    PrimaryData::One(resource) => resource,
                    PrimaryData::Many(_) => {
                        return Err(ProviderError::MalformedResponse(serde_json::Error::custom(
                            "expected a single resource object, got an array",
                        )));
                    }
                };
                Ok(ProviderResponse {
                    data: NormalizedData::One(normalize::flatten_attributes(
                        resource.id.to_value(),
                        resource.attributes,
                    )),
                    total: None,
                })
            }

            Operation::Delete { id } => {
                // The id comes from the request; the response body is ignored
                let mut record = Record::new();
                record.insert("id".to_string(), id.to_value());
                Ok(ProviderResponse {
                    data: NormalizedData::One(record),
                    total: None,
                })
            }

            // No assembly rule exists for id-filter responses; the kind is
            // rejected here the same way an unknown kind is at parse time.
            Operation::GetMany { .. } => Err(ProviderError::UnsupportedRequestKind {
                kind: RequestKind::GetMany.as_wire().to_string(),
            }),
        }
    }
}
