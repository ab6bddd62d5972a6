use crate::models::{parse_id, Document, Payload, StoredDocument};
use crate::services::store::{DocumentStore, RECENT_LIMIT};
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process store keyed by id hex, which orders the same way as the ObjectId bytes.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Payload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_recent(&self) -> Result<Vec<Document>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .rev()
            .take(RECENT_LIMIT)
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn create(&self, payload: Payload) -> Result<Document, AppError> {
        // Encode exactly as the driver does, so both backends reject the same payloads.
        mongodb::bson::to_raw_document_buf(&payload)?;

        let record = StoredDocument::new(payload);
        let document = Document::from(record);
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.data.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let key = oid.to_hex();
        Ok(self
            .documents
            .read()
            .await
            .get(&key)
            .map(|data| Document {
                id: key.clone(),
                data: data.clone(),
            }))
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        Ok(self.documents.read().await.contains_key(&oid.to_hex()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        if let Some(oid) = parse_id(id) {
            self.documents.write().await.remove(&oid.to_hex());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_then_find_returns_same_payload() {
        let store = MemoryStore::new();
        let data = payload(json!({"name": "alice", "nested": {"n": [1, 2.5, null]}}));

        let created = store.create(data.clone()).await.unwrap();
        let found = store.find_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.data, data);
    }

    #[tokio::test]
    async fn list_recent_is_capped_and_newest_first() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..25 {
            ids.push(store.create(payload(json!({ "i": i }))).await.unwrap().id);
        }

        let listed = store.list_recent().await.unwrap();
        assert_eq!(listed.len(), RECENT_LIMIT);
        assert_eq!(listed[0].id, ids[24]);
        assert!(listed.windows(2).all(|w| w[0].id > w[1].id));
        assert_eq!(store.len().await, 25);
    }

    #[tokio::test]
    async fn delete_is_a_no_op_for_unknown_ids() {
        let store = MemoryStore::new();
        let created = store.create(Payload::new()).await.unwrap();

        store.delete_by_id("nonexistent-id").await.unwrap();
        store.delete_by_id("65a1b2c3d4e5f60718293a4b").await.unwrap();
        assert!(store.exists_by_id(&created.id).await.unwrap());

        store.delete_by_id(&created.id).await.unwrap();
        assert!(!store.exists_by_id(&created.id).await.unwrap());
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn rejects_integers_outside_bson_range() {
        let store = MemoryStore::new();
        let err = store
            .create(payload(json!({ "big": u64::MAX })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn rejects_keys_with_nul_bytes() {
        let store = MemoryStore::new();
        let err = store
            .create(payload(json!({ "a\0b": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.is_empty().await);
    }
}
