pub mod document;

pub use document::{parse_id, Document, Payload, StoredDocument};
