//! JSON file document backend.
//!
//! Each document lives at `<data_dir>/<name>.json`. Writes go to a sibling
//! temp file which is then renamed over the target, so readers only ever see
//! a complete document.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use super::backend::{DocumentBackend, StorageError, StorageResult};

/// File-backed document store rooted at a data directory.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at `data_dir`. The directory is created lazily
    /// on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn document_path(&self, document: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", document))
    }
}

fn io_error(document: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        document: document.to_string(),
        source,
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn read(&self, document: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.document_path(document)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(document, e)),
        }
    }

    async fn write(&self, document: &str, contents: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| io_error(document, e))?;

        let target = self.document_path(document);
        let temp = self
            .data_dir
            .join(format!(".{}.json.{}.tmp", document, Uuid::new_v4()));

        if let Err(e) = fs::write(&temp, contents).await {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(document, e));
        }

        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(document, e));
        }

        tracing::debug!(
            document = %document,
            path = %target.display(),
            bytes = contents.len(),
            "Document written"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
