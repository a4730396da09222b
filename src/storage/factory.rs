//! Document backend factory

use std::sync::Arc;

use crate::config::StorageConfig;

use super::backend::DocumentBackend;
use super::file_backend::JsonFileBackend;
use super::memory_backend::MemoryBackend;

/// Create a document backend based on configuration.
///
/// - `"memory"`: documents live only for the lifetime of the process
/// - `"file"` (default): JSON documents under `storage.data_dir`
///
/// Unknown backend names fall back to the file backend.
pub fn create_document_backend(settings: &StorageConfig) -> Arc<dyn DocumentBackend> {
    match settings.backend.as_str() {
        "memory" => {
            tracing::info!(backend = "memory", "Creating memory document backend");
            Arc::new(MemoryBackend::new())
        }
        "file" => {
            tracing::info!(
                backend = "file",
                data_dir = %settings.data_dir,
                "Creating JSON file document backend"
            );
            Arc::new(JsonFileBackend::new(&settings.data_dir))
        }
        other => {
            tracing::warn!(
                backend = %other,
                data_dir = %settings.data_dir,
                "Unknown storage backend requested, falling back to file"
            );
            Arc::new(JsonFileBackend::new(&settings.data_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str) -> StorageConfig {
        StorageConfig {
            backend: backend.to_string(),
            data_dir: "data".to_string(),
            seed_defaults: false,
        }
    }

    #[test]
    fn test_factory_selects_backend() {
        assert_eq!(create_document_backend(&config("memory")).name(), "memory");
        assert_eq!(create_document_backend(&config("file")).name(), "file");
        assert_eq!(create_document_backend(&config("redis")).name(), "file");
    }
}
