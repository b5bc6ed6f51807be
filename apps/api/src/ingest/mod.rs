//! Document ingestion — turns uploaded bytes into the plain text the matcher reads.
//!
//! Kept behind the `DocumentIngestor` trait so the matching core never depends on
//! how text is extracted. `AppState` holds an `Arc<dyn DocumentIngestor>`.

pub mod handlers;
pub mod store;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

pub const MEDIA_TYPE_PDF: &str = "application/pdf";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MEDIA_TYPE_TEXT: &str = "text/plain";

/// Upload types the service accepts.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &[MEDIA_TYPE_PDF, MEDIA_TYPE_DOCX, MEDIA_TYPE_TEXT];

/// Text extraction capability: `bytes -> text`.
#[async_trait]
pub trait DocumentIngestor: Send + Sync {
    async fn extract_text(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Bytes,
    ) -> Result<String, AppError>;
}

/// Default ingestor: UTF-8 text and PDF. DOCX is accepted but cannot be read yet.
pub struct FileIngestor;

#[async_trait]
impl DocumentIngestor for FileIngestor {
    async fn extract_text(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Bytes,
    ) -> Result<String, AppError> {
        match media_type {
            MEDIA_TYPE_TEXT => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            MEDIA_TYPE_PDF => {
                let text = tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                })
                .await
                .map_err(|e| {
                    if e.is_panic() {
                        AppError::UnprocessableEntity(format!("Could not read PDF '{file_name}'"))
                    } else {
                        AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
                    }
                })?;

                text.map_err(|e| {
                    AppError::UnprocessableEntity(format!("Could not read PDF '{file_name}': {e}"))
                })
            }
            MEDIA_TYPE_DOCX => Err(AppError::UnprocessableEntity(format!(
                "DOCX text extraction is not supported yet ('{file_name}')"
            ))),
            other => Err(AppError::UnprocessableEntity(format!(
                "Unsupported media type '{other}' for '{file_name}'"
            ))),
        }
    }
}

/// Resolves the media type of an upload: the declared type when it is one we
/// accept, otherwise a guess from the file extension.
pub fn resolve_media_type(file_name: &str, declared: Option<&str>) -> Option<&'static str> {
    let declared = declared.map(|d| d.split(';').next().unwrap_or(d).trim());
    if let Some(found) = declared.and_then(|d| ACCEPTED_MEDIA_TYPES.iter().find(|t| **t == d)) {
        return Some(*found);
    }

    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(MEDIA_TYPE_PDF),
        "docx" => Some(MEDIA_TYPE_DOCX),
        "txt" => Some(MEDIA_TYPE_TEXT),
        _ => None,
    }
}
