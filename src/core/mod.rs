//! Core types: request model, JSON:API document model, error taxonomy

pub mod error;
pub mod request;
pub mod resource;

pub use error::ProviderError;
pub use request::{Operation, Pagination, RecordId, RequestKind, RequestParams};
pub use resource::{Document, PrimaryData, Relationship, ResourceObject};
