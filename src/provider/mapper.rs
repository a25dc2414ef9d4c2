//! Request mapping: typed operations to HTTP request descriptions
//!
//! Mapping is pure: given an [`Operation`], a resource name and the settings,
//! it produces the URL, method, headers and optional JSON body. No I/O
//! happens here, and for a typed operation the mapping cannot fail.

use crate::config::ProviderSettings;
use crate::core::request::Operation;
use indexmap::IndexMap;
use reqwest::Method;
use serde_json::{Value, json};
use url::form_urlencoded;

/// A fully mapped HTTP request, ready for a transport to execute
#[derive(Debug, Clone)]
pub struct MappedRequest {
    pub url: String,
    pub method: Method,
    pub headers: IndexMap<String, String>,
    pub body: Option<Value>,

    /// Cookie-bearing cross-origin transport is requested for every call
    pub with_credentials: bool,
}

/// Map an operation onto the JSON:API URL/method/body conventions
///
/// | operation | URL                                   | method | body |
/// |-----------|---------------------------------------|--------|------|
/// | ListAll   | `{base}/{res}?page[number]&page[size]`| GET    | none |
/// | GetOne    | `{base}/{res}/{id}`                   | GET    | none |
/// | Create    | `{base}/{res}`                        | POST   | data |
/// | Update    | `{base}/{res}/{id}`                   | PUT    | id + data |
/// | Delete    | `{base}/{res}/{id}`                   | DELETE | none |
/// | GetMany   | `{base}/{res}?filter={"id":[...]}`    | GET    | none |
pub fn map(
    operation: &Operation,
    resource: &str,
    base_url: &str,
    settings: &ProviderSettings,
) -> MappedRequest {
    let (url, method, body) = match operation {
        Operation::ListAll { pagination } => {
            // TODO: allow sorting and arbitrary filters alongside pagination
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("page[number]", &pagination.page.to_string())
                .append_pair("page[size]", &pagination.per_page.to_string())
                .finish();
            (format!("{base_url}/{resource}?{query}"), Method::GET, None)
        }

        Operation::GetOne { id } => (format!("{base_url}/{resource}/{id}"), Method::GET, None),

        Operation::Create { data } => (
            format!("{base_url}/{resource}"),
            Method::POST,
            Some(json!({
                "data": { "type": resource, "attributes": data }
            })),
        ),

        Operation::Update { id, data } => (
            format!("{base_url}/{resource}/{id}"),
            Method::PUT,
            Some(json!({
                "data": { "id": id, "type": resource, "attributes": data }
            })),
        ),

        Operation::Delete { id } => (format!("{base_url}/{resource}/{id}"), Method::DELETE, None),

        Operation::GetMany { ids } => {
            // The filter value is JSON-encoded first, then query-escaped
            let filter = json!({ "id": ids }).to_string();
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("filter", &filter)
                .finish();
            (format!("{base_url}/{resource}?{query}"), Method::GET, None)
        }
    };

    MappedRequest {
        url,
        method,
        headers: settings.headers.clone(),
        body,
        with_credentials: true,
    }
}
