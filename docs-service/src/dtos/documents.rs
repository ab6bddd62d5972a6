use crate::models::{Document, Payload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
    pub from: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedDocumentResponse {
    pub id: String,
    pub data: Payload,
    pub from: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedDocumentResponse {
    pub id: String,
    pub deleted: bool,
    pub from: String,
}
