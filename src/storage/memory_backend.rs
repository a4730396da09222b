//! In-memory document backend using DashMap.
//!
//! Documents are lost on restart. Used for tests and the `memory` storage mode.

use async_trait::async_trait;
use dashmap::DashMap;

use super::backend::{DocumentBackend, StorageResult};

/// In-memory document backend.
#[derive(Default)]
pub struct MemoryBackend {
    documents: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self, document: &str) -> StorageResult<Option<String>> {
        Ok(self.documents.get(document).map(|d| d.value().clone()))
    }

    async fn write(&self, document: &str, contents: &str) -> StorageResult<()> {
        self.documents
            .insert(document.to_string(), contents.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_document_reads_none() {
        let backend = MemoryBackend::new();
        assert!(backend.read("templates").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let backend = MemoryBackend::new();
        backend.write("templates", "[1]").await.unwrap();
        backend.write("templates", "[2]").await.unwrap();

        assert_eq!(
            backend.read("templates").await.unwrap().as_deref(),
            Some("[2]")
        );
    }
}
