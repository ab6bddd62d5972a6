use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form document body. The service never inspects its keys.
pub type Payload = Map<String, Value>;

/// Shape persisted in the `documents` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub data: Payload,
}

impl StoredDocument {
    /// Assigns a fresh ObjectId; later ids compare greater than earlier ones.
    pub fn new(data: Payload) -> Self {
        Self {
            id: ObjectId::new(),
            data,
        }
    }
}

/// Shape returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Payload,
}

impl From<StoredDocument> for Document {
    fn from(doc: StoredDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            data: doc.data,
        }
    }
}

/// Parses a path id. Anything that is not an ObjectId cannot exist in the store.
pub fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
