//! Axum route handlers for the document library.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::resolve_media_type;
use crate::models::document::{CandidateDocument, DocumentSummary};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RejectedUpload {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub documents: Vec<DocumentSummary>,
    pub rejected: Vec<RejectedUpload>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Multipart upload of one or more files. Files of an unsupported type, or
/// whose text cannot be extracted, are reported back; the rest are stored.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let declared = field.content_type().map(str::to_string);

        let Some(media_type) = resolve_media_type(&file_name, declared.as_deref()) else {
            rejected.push(RejectedUpload {
                name: file_name,
                reason: "Only PDF, DOCX, and TXT files are accepted".to_string(),
            });
            continue;
        };

        let bytes = field.bytes().await.map_err(multipart_error)?;
        let size_bytes = bytes.len() as u64;

        match state
            .ingestor
            .extract_text(&file_name, media_type, bytes)
            .await
        {
            Ok(content) => accepted.push(CandidateDocument::new(
                file_name, media_type, size_bytes, content,
            )),
            Err(AppError::UnprocessableEntity(reason)) => {
                warn!("Rejected upload '{file_name}': {reason}");
                rejected.push(RejectedUpload {
                    name: file_name,
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    if accepted.is_empty() && rejected.is_empty() {
        return Err(AppError::Validation(
            "upload contained no files".to_string(),
        ));
    }

    let documents: Vec<DocumentSummary> = accepted.iter().map(DocumentSummary::from).collect();
    info!(
        "Stored {} document(s), rejected {}",
        documents.len(),
        rejected.len()
    );
    state.documents.add(accepted).await;

    Ok(Json(UploadResponse {
        documents,
        rejected,
    }))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
) -> Json<DocumentListResponse> {
    let documents = state.documents.summaries().await;
    Json(DocumentListResponse {
        count: documents.len(),
        documents,
    })
}

/// DELETE /api/v1/documents/:id
///
/// Removes the document and its row from the latest ranked list.
pub async fn handle_remove_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.documents.remove(id).await {
        return Err(AppError::NotFound(format!("Document {id} not found")));
    }
    state.analysis.remove_document(id).await;
    info!("Removed document {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/documents
///
/// Reset: drops every document and the cached analysis.
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    state.documents.clear().await;
    state.analysis.clear().await;
    info!("Document library reset");
    StatusCode::NO_CONTENT
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
