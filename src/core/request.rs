//! Request kinds, parameters and the typed operations built from them
//!
//! The front end speaks in string request kinds (`GET_LIST`, `GET_ONE`, ...)
//! with a loose, kind-dependent parameter object. Both are converted into a
//! typed [`Operation`] before any network I/O, so an unknown kind or a
//! missing parameter fails closed without touching the transport.

use crate::core::error::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The six recognized request kinds
///
/// Matched exhaustively everywhere; an unrecognized wire string never makes it
/// past [`RequestKind::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ListAll,
    GetOne,
    Create,
    Update,
    Delete,
    GetMany,
}

impl RequestKind {
    /// Parse a front-end wire string into a kind
    ///
    /// Fails with [`ProviderError::UnsupportedRequestKind`] carrying the
    /// offending value for anything outside the six recognized constants.
    pub fn parse(kind: &str) -> Result<Self, ProviderError> {
        match kind {
            "GET_LIST" => Ok(RequestKind::ListAll),
            "GET_ONE" => Ok(RequestKind::GetOne),
            "CREATE" => Ok(RequestKind::Create),
            "UPDATE" => Ok(RequestKind::Update),
            "DELETE" => Ok(RequestKind::Delete),
            "GET_MANY" => Ok(RequestKind::GetMany),
            other => Err(ProviderError::UnsupportedRequestKind {
                kind: other.to_string(),
            }),
        }
    }

    /// The wire constant the front end uses for this kind
    pub fn as_wire(&self) -> &'static str {
        match self {
            RequestKind::ListAll => "GET_LIST",
            RequestKind::GetOne => "GET_ONE",
            RequestKind::Create => "CREATE",
            RequestKind::Update => "UPDATE",
            RequestKind::Delete => "DELETE",
            RequestKind::GetMany => "GET_MANY",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A record identifier, either a string or an integer
///
/// JSON:API servers return string ids, but front ends routinely send numeric
/// ones in parameters. The id is carried and echoed back exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    String(String),
}

impl RecordId {
    /// The id as a JSON value, preserving its original type
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Number(n) => Value::from(*n),
            RecordId::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::String(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::String(s)
    }
}

/// Pagination window for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page number, starting at 1
    pub page: u32,
    /// Number of records per page
    pub per_page: u32,
}

/// The loose, kind-dependent parameter payload sent by the front end
///
/// Which members must be present depends on the request kind; the check
/// happens in [`Operation::from_params`], before any network call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestParams {
    pub pagination: Option<Pagination>,
    pub id: Option<RecordId>,
    pub data: Option<Map<String, Value>>,
    pub ids: Option<Vec<RecordId>>,
}

impl RequestParams {
    /// Params for a paginated list request
    pub fn list(page: u32, per_page: u32) -> Self {
        Self {
            pagination: Some(Pagination { page, per_page }),
            ..Self::default()
        }
    }

    /// Params carrying a single record id
    pub fn by_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Params carrying a record payload (create)
    pub fn with_data(data: Map<String, Value>) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Params carrying an id and a record payload (update)
    pub fn update(id: impl Into<RecordId>, data: Map<String, Value>) -> Self {
        Self {
            id: Some(id.into()),
            data: Some(data),
            ..Self::default()
        }
    }

    /// Params carrying an ordered id list
    pub fn by_ids(ids: Vec<RecordId>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }
}

/// A fully-typed provider operation
///
/// Built from `(RequestKind, RequestParams)` or directly by the typed
/// convenience methods. Once an `Operation` exists, mapping it to an HTTP
/// request cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListAll { pagination: Pagination },
    GetOne { id: RecordId },
    Create { data: Map<String, Value> },
    Update { id: RecordId, data: Map<String, Value> },
    Delete { id: RecordId },
    GetMany { ids: Vec<RecordId> },
}

impl Operation {
    /// Combine a kind with front-end params into a typed operation
    ///
    /// Fails with [`ProviderError::MissingParameter`] when a member the kind
    /// requires is absent.
    pub fn from_params(kind: RequestKind, params: RequestParams) -> Result<Self, ProviderError> {
        let missing = |field| ProviderError::MissingParameter { kind, field };

        match kind {
            RequestKind::ListAll => Ok(Operation::ListAll {
                pagination: params.pagination.ok_or_else(|| missing("pagination"))?,
            }),
            RequestKind::GetOne => Ok(Operation::GetOne {
                id: params.id.ok_or_else(|| missing("id"))?,
            }),
            RequestKind::Create => Ok(Operation::Create {
                data: params.data.ok_or_else(|| missing("data"))?,
            }),
            RequestKind::Update => Ok(Operation::Update {
                id: params.id.ok_or_else(|| missing("id"))?,
                data: params.data.ok_or_else(|| missing("data"))?,
            }),
            RequestKind::Delete => Ok(Operation::Delete {
                id: params.id.ok_or_else(|| missing("id"))?,
            }),
            RequestKind::GetMany => Ok(Operation::GetMany {
                ids: params.ids.ok_or_else(|| missing("ids"))?,
            }),
        }
    }

    /// The kind this operation was built from
    pub fn kind(&self) -> RequestKind {
        match self {
            Operation::ListAll { .. } => RequestKind::ListAll,
            Operation::GetOne { .. } => RequestKind::GetOne,
            Operation::Create { .. } => RequestKind::Create,
            Operation::Update { .. } => RequestKind::Update,
            Operation::Delete { .. } => RequestKind::Delete,
            Operation::GetMany { .. } => RequestKind::GetMany,
        }
    }
}
