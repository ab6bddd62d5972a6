pub mod documents;
pub mod health;

pub use documents::{create_document, delete_document, get_document, list_documents};
pub use health::{health_check, metrics_endpoint, readiness_check};
