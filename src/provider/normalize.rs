//! Response normalization: JSON:API resource objects to flat records
//!
//! A resource object is flattened into a single-level record: `id`, every
//! attribute unchanged, then each relationship whose linkage `data` is
//! present and truthy. The linkage value is carried raw, not resolved.

use crate::core::resource::{PrimaryData, ResourceObject};
use serde::Serialize;
use serde_json::{Map, Value};

/// A flattened record: `id` plus attributes plus qualifying relationships
pub type Record = Map<String, Value>;

/// Normalized primary data, mirroring the one-or-many shape of the input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedData {
    One(Record),
    Many(Vec<Record>),
}

impl NormalizedData {
    /// The single record, if this is one
    pub fn as_one(&self) -> Option<&Record> {
        match self {
            NormalizedData::One(record) => Some(record),
            NormalizedData::Many(_) => None,
        }
    }

    /// The record sequence, if this is many
    pub fn as_many(&self) -> Option<&[Record]> {
        match self {
            NormalizedData::One(_) => None,
            NormalizedData::Many(records) => Some(records),
        }
    }
}

/// Flatten primary data, preserving the input order for arrays
///
/// Pure and total over well-formed JSON:API input; no I/O.
pub fn normalize(data: PrimaryData) -> NormalizedData {
    match data {
        PrimaryData::Many(items) => {
            NormalizedData::Many(items.into_iter().map(flatten).collect())
        }
        PrimaryData::One(item) => NormalizedData::One(flatten(item)),
    }
}

/// Flatten one resource object, folding in truthy relationship linkages
pub fn flatten(resource: ResourceObject) -> Record {
    let mut record = flatten_attributes(resource.id.to_value(), resource.attributes);
    for (name, relationship) in resource.relationships {
        if truthy(&relationship.data) {
            record.insert(name, relationship.data);
        }
    }
    record
}

/// Flatten to `id` + attributes only, discarding relationships
pub fn flatten_attributes(id: Value, attributes: Map<String, Value>) -> Record {
    let mut record = Record::new();
    record.insert("id".to_string(), id);
    record.extend(attributes);
    record
}

// Mirrors loose boolean coercion: null, false, 0 and "" drop the key.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> ResourceObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_id_and_attributes_unchanged() {
        let record = flatten(resource(json!({
            "id": "12",
            "type": "posts",
            "attributes": { "title": "Hello", "views": 7, "draft": false }
        })));

        assert_eq!(record["id"], json!("12"));
        assert_eq!(record["title"], json!("Hello"));
        assert_eq!(record["views"], json!(7));
        assert_eq!(record["draft"], json!(false));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_relationship_with_linkage_is_folded_raw() {
        let record = flatten(resource(json!({
            "id": "1",
            "type": "posts",
            "attributes": { "title": "a" },
            "relationships": {
                "author": { "data": { "id": "5", "type": "people" } },
                "tags": { "data": [ { "id": "2", "type": "tags" } ] }
            }
        })));

        assert_eq!(record["author"], json!({ "id": "5", "type": "people" }));
        assert_eq!(record["tags"], json!([{ "id": "2", "type": "tags" }]));
    }

    #[test]
    fn test_null_or_absent_linkage_is_dropped() {
        let record = flatten(resource(json!({
            "id": "1",
            "type": "posts",
            "attributes": {},
            "relationships": {
                "author": { "data": null },
                "editor": { "links": { "related": "/editors/1" } }
            }
        })));

        assert!(!record.contains_key("author"));
        assert!(!record.contains_key("editor"));
    }

    #[test]
    fn test_empty_linkage_array_is_kept() {
        let record = flatten(resource(json!({
            "id": "1",
            "type": "posts",
            "attributes": {},
            "relationships": { "tags": { "data": [] } }
        })));

        assert_eq!(record["tags"], json!([]));
    }

    #[test]
    fn test_normalize_array_preserves_length_and_order() {
        let data: PrimaryData = serde_json::from_value(json!([
            { "id": "b", "type": "posts", "attributes": {} },
            { "id": "a", "type": "posts", "attributes": {} },
            { "id": "c", "type": "posts", "attributes": {} }
        ]))
        .unwrap();

        let records = match normalize(data) {
            NormalizedData::Many(records) => records,
            NormalizedData::One(_) => panic!("expected many"),
        };
        let ids: Vec<&Value> = records.iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&json!("b"), &json!("a"), &json!("c")]);
    }

    #[test]
    fn test_normalize_single_object() {
        let data: PrimaryData = serde_json::from_value(json!(
            { "id": "1", "type": "posts", "attributes": { "title": "x" } }
        ))
        .unwrap();

        let record = match normalize(data) {
            NormalizedData::One(record) => record,
            NormalizedData::Many(_) => panic!("expected one"),
        };
        assert_eq!(record["title"], json!("x"));
    }

    #[test]
    fn test_flatten_attributes_discards_relationships() {
        let res = resource(json!({
            "id": "1",
            "type": "posts",
            "attributes": { "title": "a" },
            "relationships": { "author": { "data": { "id": "5", "type": "people" } } }
        }));

        let record = flatten_attributes(res.id.to_value(), res.attributes);
        assert_eq!(record["title"], json!("a"));
        assert!(!record.contains_key("author"));
    }
}
