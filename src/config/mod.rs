//! Provider settings
//!
//! An explicit settings struct with named fields replaces the generic
//! deep-merge the settings shape would otherwise need: the shape is fixed and
//! shallow, so overrides apply field by field, with caller values winning on
//! conflicting header keys.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Extracts the total record count from a JSON:API `meta` object
pub type TotalExtractor = Arc<dyn Fn(&Value) -> Option<u64> + Send + Sync>;

/// The JSON:API media type sent on every request
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json; charset=utf-8";

/// Settings for a [`JsonApiProvider`](crate::provider::JsonApiProvider)
///
/// Defaults carry the JSON:API media type headers and a total extractor
/// reading `meta.total`.
///
/// # Example
/// ```rust,ignore
/// let settings = ProviderSettings::new()
///     .header("Authorization", "Bearer ...")
///     .total_field("record-count");
/// ```
#[derive(Clone)]
pub struct ProviderSettings {
    /// Headers attached to every request; insertion order is preserved
    pub headers: IndexMap<String, String>,

    get_total: TotalExtractor,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        let mut headers = IndexMap::new();
        headers.insert("Accept".to_string(), JSONAPI_MEDIA_TYPE.to_string());
        headers.insert("Content-Type".to_string(), JSONAPI_MEDIA_TYPE.to_string());

        Self {
            headers,
            get_total: meta_field_extractor("total"),
        }
    }
}

impl ProviderSettings {
    /// Settings with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, overriding the default for that key if present
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Read the total count from a different `meta` field than `total`
    pub fn total_field(mut self, field: impl Into<String>) -> Self {
        self.get_total = meta_field_extractor(field);
        self
    }

    /// Replace the total extractor entirely
    pub fn total_extractor(
        mut self,
        extractor: impl Fn(&Value) -> Option<u64> + Send + Sync + 'static,
    ) -> Self {
        self.get_total = Arc::new(extractor);
        self
    }

    /// Apply the configured extractor to a response `meta` object
    pub fn total_from(&self, meta: &Value) -> Option<u64> {
        (self.get_total)(meta)
    }
}

fn meta_field_extractor(field: impl Into<String>) -> TotalExtractor {
    let field = field.into();
    Arc::new(move |meta: &Value| meta.get(&field).and_then(Value::as_u64))
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("headers", &self.headers)
            .field("get_total", &"<extractor>")
            .finish()
    }
}
