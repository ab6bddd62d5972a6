use crate::models::{parse_id, Document, Payload, StoredDocument};
use crate::services::store::{DocumentStore, RECENT_LIMIT};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, CountOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const DOCUMENTS_COLLECTION: &str = "documents";
const FALLBACK_DATABASE: &str = "test";

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    /// Builds a pooled client. The server is not contacted until the first operation.
    ///
    /// Database precedence: `database`, then the one named in `uri`, then `test`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        let options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        let database = database
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| FALLBACK_DATABASE.to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub fn documents(&self) -> Collection<StoredDocument> {
        self.db.collection(DOCUMENTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_recent(&self) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "_id": -1 })
            .limit(RECENT_LIMIT as i64)
            .build();

        let mut cursor = self
            .documents()
            .find(None, find_options)
            .await
            .map_err(AppError::from)?;

        let mut documents = Vec::with_capacity(RECENT_LIMIT);
        while let Some(doc) = cursor.try_next().await.map_err(AppError::from)? {
            documents.push(Document::from(doc));
        }
        Ok(documents)
    }

    async fn create(&self, payload: Payload) -> Result<Document, AppError> {
        let record = StoredDocument::new(payload);
        self.documents()
            .insert_one(&record, None)
            .await
            .map_err(|e| {
                tracing::error!(document_id = %record.id, "Failed to insert document: {}", e);
                AppError::from(e)
            })?;
        Ok(Document::from(record))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let found = self
            .documents()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(AppError::from)?;
        Ok(found.map(Document::from))
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let count = self
            .documents()
            .count_documents(doc! { "_id": oid }, CountOptions::builder().limit(1u64).build())
            .await
            .map_err(AppError::from)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(());
        };
        self.documents()
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(document_id = %id, "Failed to delete document: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 1; building the client never dials it.
    const OFFLINE_URI: &str = "mongodb://127.0.0.1:1";

    #[tokio::test]
    async fn explicit_database_wins_over_uri() {
        let store = MongoStore::connect(&format!("{}/fromuri", OFFLINE_URI), Some("explicit"))
            .await
            .unwrap();
        assert_eq!(store.database().name(), "explicit");
    }

    #[tokio::test]
    async fn database_named_in_uri_is_used_when_not_configured() {
        let store = MongoStore::connect(&format!("{}/fromuri", OFFLINE_URI), None)
            .await
            .unwrap();
        assert_eq!(store.database().name(), "fromuri");
    }

    #[tokio::test]
    async fn falls_back_to_test_database() {
        let store = MongoStore::connect(OFFLINE_URI, None).await.unwrap();
        assert_eq!(store.database().name(), FALLBACK_DATABASE);
    }

    #[tokio::test]
    async fn malformed_uri_is_rejected() {
        assert!(MongoStore::connect("not-a-mongo-uri", None).await.is_err());
    }
}
