//! JSON:API document types, as consumed from the backend
//!
//! Only the members the provider reads are modeled: primary `data` (a single
//! resource object or an array), the `meta` object the total count is read
//! from, and per-resource `attributes` and `relationships`. Everything else a
//! server may include (`links`, `included`, ...) is ignored rather than
//! rejected.

use crate::core::request::RecordId;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A JSON:API top-level document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub data: PrimaryData,

    /// Top-level meta object; `Null` when the server sends none
    #[serde(default)]
    pub meta: Value,
}

/// Primary data: one resource object or an ordered array of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(ResourceObject),
}

/// A JSON:API resource object
///
/// The `type` member is not modeled: flattening never reads it, so it is
/// skipped along with the other unknown members.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceObject {
    pub id: RecordId,

    #[serde(default)]
    pub attributes: Map<String, Value>,

    #[serde(default)]
    pub relationships: IndexMap<String, Relationship>,
}

/// A relationship entry on a resource object
///
/// Only the linkage `data` member is consumed; absent linkage deserializes to
/// `Null` so it is treated the same as an explicit `"data": null`.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Value,
}
