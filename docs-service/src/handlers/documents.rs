use crate::dtos::{CreatedDocumentResponse, DeletedDocumentResponse, DocumentListResponse};
use crate::models::Payload;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use service_core::error::AppError;

pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let documents = state.store.list_recent().await.map_err(|e| {
        tracing::error!("Failed to list documents: {}", e);
        e
    })?;

    tracing::debug!(count = documents.len(), "Listed recent documents");

    Ok(Json(DocumentListResponse {
        documents,
        from: state.config.app_name.clone(),
    }))
}

pub async fn create_document(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> Result<impl IntoResponse, AppError> {
    let document = state.store.create(payload).await?;

    counter!("docs_created_total").increment(1);
    tracing::info!(document_id = %document.id, "Document created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedDocumentResponse {
            id: document.id,
            data: document.data,
            from: state.config.app_name.clone(),
        }),
    ))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Response, AppError> {
    // A miss is a bare 404; AppError::NotFound would add a JSON body.
    match state.store.find_by_id(&document_id).await? {
        Some(document) => Ok(Json(document).into_response()),
        None => {
            tracing::debug!(document_id = %document_id, "Document not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Response, AppError> {
    if !state.store.exists_by_id(&document_id).await? {
        tracing::debug!(document_id = %document_id, "Nothing to delete");
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    state.store.delete_by_id(&document_id).await?;

    counter!("docs_deleted_total").increment(1);
    tracing::info!(document_id = %document_id, "Document deleted");

    Ok(Json(DeletedDocumentResponse {
        id: document_id,
        deleted: true,
        from: state.config.app_name.clone(),
    })
    .into_response())
}
