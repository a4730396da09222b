//! Backend trait and error types for document storage.

use async_trait::async_trait;
use thiserror::Error;

/// Storage-level error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on document '{document}': {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document '{document}' is corrupt: {source}")]
    Corrupt {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode document '{document}': {source}")]
    Encode {
        document: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable store of named JSON documents.
///
/// Implementations must make `write` all-or-nothing: after a failed write the
/// previous contents (or absence) of the document are still observable.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Read a document. Returns `Ok(None)` when it has never been written.
    async fn read(&self, document: &str) -> StorageResult<Option<String>>;

    /// Replace a document's contents.
    async fn write(&self, document: &str, contents: &str) -> StorageResult<()>;

    /// Backend name for logging and health output
    fn name(&self) -> &'static str;
}
