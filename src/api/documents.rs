//! Document endpoints: versioned saves, lineage lookups, deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_content, validate_template_style, validate_title};
use crate::db::{Document, DocumentLineageQuery, DocumentListQuery, SaveDocumentRequest};
use crate::store::documents;
use crate::AppState;

fn validate_save_request(req: &SaveDocumentRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_title(&req.title) {
        errors.add("title", e);
    }
    if let Err(e) = validate_content(&req.content) {
        errors.add("content", e);
    }
    if let Err(e) = validate_template_style(&req.template_style) {
        errors.add("template_style", e);
    }

    errors.finish()
}

/// Save a document, appending a new version to its lineage
///
/// POST /api/users/:id/documents
pub async fn save_document(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SaveDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    validate_save_request(&req)?;

    let document = documents::save_document(
        &state.db,
        &user_id,
        req.document_type,
        &req.title,
        &req.content,
        req.template_style.as_deref(),
    )
    .await?;

    tracing::info!(
        user_id = %user_id,
        document_id = %document.id,
        version = document.version_number,
        "Document version saved"
    );
    Ok((StatusCode::CREATED, Json(document)))
}

/// List a user's documents, newest first, optionally filtered by type
///
/// GET /api/users/:id/documents?document_type=
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = documents::list_documents(&state.db, &user_id, query.document_type).await?;
    Ok(Json(documents))
}

/// Get the latest version of a lineage
///
/// GET /api/users/:id/documents/latest?title=&document_type=
pub async fn get_latest(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<DocumentLineageQuery>,
) -> Result<Json<Document>, ApiError> {
    let document =
        documents::get_latest(&state.db, &user_id, &query.title, query.document_type).await?;
    Ok(Json(document))
}

/// Get every version of a lineage, oldest first
///
/// GET /api/users/:id/documents/versions?title=&document_type=
pub async fn list_versions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<DocumentLineageQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents =
        documents::list_versions(&state.db, &user_id, &query.title, query.document_type).await?;
    Ok(Json(documents))
}

/// Delete one version; the path user must own it
///
/// DELETE /api/users/:id/documents/:doc_id
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path((user_id, doc_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    documents::delete_document(&state.db, &doc_id, &user_id).await?;

    tracing::info!(user_id = %user_id, document_id = %doc_id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
