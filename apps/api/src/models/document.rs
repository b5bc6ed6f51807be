use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate document as handed over by ingestion: plain text plus upload metadata.
/// The matcher reads only `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub content: String,
}

impl CandidateDocument {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
        content: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            uploaded_at: Utc::now(),
            content,
        }
    }
}

/// Listing view of a stored document, without its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub size_label: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&CandidateDocument> for DocumentSummary {
    fn from(doc: &CandidateDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name.clone(),
            media_type: doc.media_type.clone(),
            size_bytes: doc.size_bytes,
            size_label: format_file_size(doc.size_bytes),
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// Human-readable size in base 1024 with up to two decimals: `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[unit])
}
