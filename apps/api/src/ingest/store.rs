//! In-memory document library, kept in upload order.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::document::{CandidateDocument, DocumentSummary};

/// Uploaded documents. Insertion order is the ranking tie-break order.
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<RwLock<Vec<CandidateDocument>>>,
}

impl DocumentStore {
    pub async fn add(&self, documents: Vec<CandidateDocument>) {
        self.inner.write().await.extend(documents);
    }

    /// Owned copy for a scoring run; the lock is not held while scoring.
    pub async fn snapshot(&self) -> Vec<CandidateDocument> {
        self.inner.read().await.clone()
    }

    pub async fn summaries(&self) -> Vec<DocumentSummary> {
        self.inner
            .read()
            .await
            .iter()
            .map(DocumentSummary::from)
            .collect()
    }

    /// Returns `false` when no document had this id.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut documents = self.inner.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        documents.len() != before
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> CandidateDocument {
        CandidateDocument::new(name, "text/plain", 4, "text".to_string())
    }

    #[tokio::test]
    async fn test_add_keeps_upload_order() {
        let store = DocumentStore::default();
        store.add(vec![doc("a.txt"), doc("b.txt")]).await;
        store.add(vec![doc("c.txt")]).await;

        let names: Vec<String> = store.snapshot().await.into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_remove_known_and_unknown() {
        let store = DocumentStore::default();
        let first = doc("a.txt");
        let id = first.id;
        store.add(vec![first, doc("b.txt")]).await;

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert_eq!(store.summaries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = DocumentStore::default();
        store.add(vec![doc("a.txt")]).await;
        store.clear().await;
        assert!(store.snapshot().await.is_empty());
    }
}
