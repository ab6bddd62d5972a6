use crate::models::{Document, Payload};
use async_trait::async_trait;
use service_core::error::AppError;

/// Upper bound on documents returned by [`DocumentStore::list_recent`].
pub const RECENT_LIMIT: usize = 20;

/// Document access layer. Each method issues a single store operation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Newest first by id, at most [`RECENT_LIMIT`] entries.
    async fn list_recent(&self) -> Result<Vec<Document>, AppError>;

    /// Persists `payload` under a newly assigned id.
    async fn create(&self, payload: Payload) -> Result<Document, AppError>;

    /// `Ok(None)` when no document has this id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, AppError>;

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError>;

    /// Removing an unknown id is a no-op.
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;

    /// Connectivity probe that touches no application data.
    async fn ping(&self) -> Result<(), AppError>;
}
