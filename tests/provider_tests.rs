//! Dispatch and response-assembly tests using a recording transport
//!
//! These tests verify that:
//! - Unknown kinds and missing parameters fail before any HTTP exchange
//! - Each kind assembles its response per the provider contract
//! - The delete response echoes the request id regardless of the body
//! - Single-record responses surface only id + attributes

use jsonapi_provider::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

// =============================================================================
// Transport spy
// =============================================================================

/// Records every mapped request and replays a canned JSON body
struct RecordingTransport {
    requests: Mutex<Vec<MappedRequest>>,
    response: Value,
}

impl RecordingTransport {
    fn replying(response: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> MappedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: &MappedRequest) -> Result<Value, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

fn provider_with(transport: Arc<RecordingTransport>) -> JsonApiProvider {
    JsonApiProvider::with_transport(
        "https://api.example.com",
        ProviderSettings::default(),
        transport,
    )
}

fn record(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =============================================================================
// Fails-closed dispatch
// =============================================================================

#[tokio::test]
async fn unknown_kind_rejects_before_any_http_call() {
    let transport = RecordingTransport::replying(json!({}));
    let provider = provider_with(transport.clone());

    let err = provider
        .call("GET_UNKNOWN", "posts", RequestParams::default())
        .await
        .unwrap_err();

    match err {
        ProviderError::UnsupportedRequestKind { kind } => assert_eq!(kind, "GET_UNKNOWN"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn missing_parameter_rejects_before_any_http_call() {
    let transport = RecordingTransport::replying(json!({}));
    let provider = provider_with(transport.clone());

    // GET_LIST without pagination
    let err = provider
        .call("GET_LIST", "posts", RequestParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MissingParameter { .. }));
    assert_eq!(transport.request_count(), 0);
}

// =============================================================================
// Per-kind assembly
// =============================================================================

#[tokio::test]
async fn list_normalizes_records_and_reads_total_from_meta() {
    let transport = RecordingTransport::replying(json!({
        "data": [
            {
                "id": "1",
                "type": "posts",
                "attributes": { "title": "first" },
                "relationships": {
                    "author": { "data": { "id": "9", "type": "people" } },
                    "editor": { "data": null }
                }
            },
            { "id": "2", "type": "posts", "attributes": { "title": "second" } }
        ],
        "meta": { "total": 812 }
    }));
    let provider = provider_with(transport.clone());

    let response = provider
        .call("GET_LIST", "posts", RequestParams::list(2, 10))
        .await
        .unwrap();

    assert_eq!(response.total, Some(812));
    let records = response.data.as_many().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], json!("first"));
    // Relationships with linkage are folded in, null linkage is dropped
    assert_eq!(records[0]["author"], json!({ "id": "9", "type": "people" }));
    assert!(!records[0].contains_key("editor"));

    let request = transport.last_request();
    assert!(request.url.contains("page%5Bnumber%5D=2"));
    assert!(request.url.contains("page%5Bsize%5D=10"));
}

#[tokio::test]
async fn get_one_surfaces_only_id_and_attributes() {
    let transport = RecordingTransport::replying(json!({
        "data": {
            "id": "42",
            "type": "posts",
            "attributes": { "title": "hello" },
            "relationships": { "author": { "data": { "id": "9", "type": "people" } } }
        }
    }));
    let provider = provider_with(transport.clone());

    let response = provider
        .call("GET_ONE", "posts", RequestParams::by_id(42))
        .await
        .unwrap();

    let one = response.data.as_one().unwrap();
    assert_eq!(one["id"], json!("42"));
    assert_eq!(one["title"], json!("hello"));
    // Unlike list normalization, the relationship is not folded in here
    assert!(!one.contains_key("author"));
    assert_eq!(response.total, None);
}

#[tokio::test]
async fn create_posts_wrapped_attributes_and_flattens_the_reply() {
    let transport = RecordingTransport::replying(json!({
        "data": { "id": "7", "type": "posts", "attributes": { "title": "Hi" } }
    }));
    let provider = provider_with(transport.clone());

    let response = provider
        .call(
            "CREATE",
            "posts",
            RequestParams::with_data(record(&[("title", json!("Hi"))])),
        )
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.url, "https://api.example.com/posts");
    assert_eq!(
        request.body.unwrap().to_string(),
        r#"{"data":{"type":"posts","attributes":{"title":"Hi"}}}"#
    );

    let one = response.data.as_one().unwrap();
    assert_eq!(one["id"], json!("7"));
    assert_eq!(one["title"], json!("Hi"));
}

#[tokio::test]
async fn update_puts_id_alongside_attributes() {
    let transport = RecordingTransport::replying(json!({
        "data": { "id": "42", "type": "posts", "attributes": { "title": "New" } }
    }));
    let provider = provider_with(transport.clone());

    provider
        .update("posts", 42, record(&[("title", json!("New"))]))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, reqwest::Method::PUT);
    assert_eq!(request.url, "https://api.example.com/posts/42");
    assert_eq!(
        request.body.unwrap().to_string(),
        r#"{"data":{"id":42,"type":"posts","attributes":{"title":"New"}}}"#
    );
}

#[tokio::test]
async fn delete_echoes_request_id_regardless_of_response_body() {
    // Server replies with something entirely unrelated
    let transport = RecordingTransport::replying(json!({ "gone": true }));
    let provider = provider_with(transport.clone());

    let response = provider
        .call("DELETE", "posts", RequestParams::by_id(42))
        .await
        .unwrap();

    let one = response.data.as_one().unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one["id"], json!(42));

    let request = transport.last_request();
    assert_eq!(request.method, reqwest::Method::DELETE);
    assert_eq!(request.url, "https://api.example.com/posts/42");
}

#[tokio::test]
async fn delete_preserves_string_id_type() {
    let transport = RecordingTransport::replying(Value::Null);
    let provider = provider_with(transport);

    let response = provider.delete("posts", "ab-12").await.unwrap();
    assert_eq!(response.data.as_one().unwrap()["id"], json!("ab-12"));
}

#[tokio::test]
async fn get_many_issues_the_request_then_rejects_at_assembly() {
    let transport = RecordingTransport::replying(json!({ "data": [] }));
    let provider = provider_with(transport.clone());

    let err = provider
        .call(
            "GET_MANY",
            "posts",
            RequestParams::by_ids(vec![1.into(), 2.into(), 3.into()]),
        )
        .await
        .unwrap_err();

    // The URL contract holds and the exchange happens, but there is no
    // assembly rule for id-filter responses.
    assert_eq!(transport.request_count(), 1);
    match err {
        ProviderError::UnsupportedRequestKind { kind } => assert_eq!(kind, "GET_MANY"),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Malformed responses
// =============================================================================

#[tokio::test]
async fn list_body_without_data_member_is_malformed() {
    let transport = RecordingTransport::replying(json!({ "meta": { "total": 1 } }));
    let provider = provider_with(transport);

    let err = provider
        .call("GET_LIST", "posts", RequestParams::list(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn get_one_array_body_is_malformed() {
    let transport = RecordingTransport::replying(json!({
        "data": [{ "id": "1", "type": "posts", "attributes": {} }]
    }));
    let provider = provider_with(transport);

    let err = provider.get_one("posts", 1).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}
