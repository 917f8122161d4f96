//! In-memory implementations of the ports (tests).

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::BacklogError;
use crate::ports::{DocumentStore, TrackingDocument};

/// Keeps documents in a map keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: BTreeMap<String, String>,
    /// 書き込み順（テストで順序を確認するため）
    order: Vec<String>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a document, e.g. to provoke a collision.
    pub fn with_document(mut self, file_name: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(file_name.into(), body.into());
        self
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.documents.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// File names in the order `create` accepted them.
    pub fn written(&self) -> &[String] {
        &self.order
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn create(&mut self, file_name: &str, body: &str) -> Result<PathBuf, BacklogError> {
        if self.documents.contains_key(file_name) {
            return Err(BacklogError::Collision {
                path: PathBuf::from(file_name),
            });
        }
        self.documents.insert(file_name.to_string(), body.to_string());
        self.order.push(file_name.to_string());
        Ok(PathBuf::from(file_name))
    }
}

/// A backlog held in memory. `None` behaves like a missing file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackingDocument {
    contents: Option<String>,
    appends: usize,
}

impl InMemoryTrackingDocument {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            appends: 0,
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of `append` calls so far.
    pub fn append_count(&self) -> usize {
        self.appends
    }
}

impl TrackingDocument for InMemoryTrackingDocument {
    fn read(&self) -> Result<String, BacklogError> {
        self.contents
            .clone()
            .ok_or_else(|| BacklogError::TrackingNotFound {
                path: PathBuf::from("<memory>"),
                documents_written: 0,
            })
    }

    fn append(&mut self, rows: &str) -> Result<(), BacklogError> {
        let contents = self
            .contents
            .as_mut()
            .ok_or_else(|| BacklogError::TrackingNotFound {
                path: PathBuf::from("<memory>"),
                documents_written: 0,
            })?;
        contents.push_str(rows);
        self.appends += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_store_rejects_duplicates() {
        let mut store = InMemoryDocumentStore::new();
        store.create("001_a.md", "a").unwrap();

        assert!(matches!(
            store.create("001_a.md", "b"),
            Err(BacklogError::Collision { .. })
        ));
        assert_eq!(store.get("001_a.md"), Some("a"));
        assert_eq!(store.written(), ["001_a.md".to_string()]);
    }

    #[test]
    fn tracking_document_counts_appends() {
        let mut tracking = InMemoryTrackingDocument::new("head\n");
        tracking.append("row\n").unwrap();

        assert_eq!(tracking.contents(), Some("head\nrow\n"));
        assert_eq!(tracking.append_count(), 1);
    }

    #[test]
    fn missing_tracking_document() {
        let mut tracking = InMemoryTrackingDocument::missing();
        assert!(tracking.read().is_err());
        assert!(tracking.append("row\n").is_err());
        assert_eq!(tracking.append_count(), 0);
    }
}
