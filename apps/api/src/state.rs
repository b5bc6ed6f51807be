use std::sync::Arc;

use crate::config::Config;
use crate::ingest::store::DocumentStore;
use crate::ingest::{DocumentIngestor, FileIngestor};
use crate::matching::cache::AnalysisCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Uploaded documents, in upload order.
    pub documents: DocumentStore,
    /// Latest ranked list; filtering reads from here.
    pub analysis: AnalysisCache,
    /// Pluggable text extraction. Default: FileIngestor.
    pub ingestor: Arc<dyn DocumentIngestor>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            documents: DocumentStore::default(),
            analysis: AnalysisCache::default(),
            ingestor: Arc::new(FileIngestor),
        }
    }
}
