pub mod documents;
pub mod health;

pub use documents::{CreatedDocumentResponse, DeletedDocumentResponse, DocumentListResponse};
pub use health::HealthResponse;
