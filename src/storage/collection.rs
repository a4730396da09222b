//! Typed collection over a JSON array document.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use super::backend::{DocumentBackend, StorageError, StorageResult};

/// Outcome of a mutation closure passed to [`Collection::modify`].
pub enum Change<R> {
    /// Persist the modified items, then return the value.
    Commit(R),
    /// Nothing changed; return the value without writing.
    Discard(R),
}

/// A list of records persisted as one JSON array document.
///
/// Read-modify-write cycles run under a per-collection lock, so concurrent
/// `modify` calls are applied one after another instead of last-write-wins.
/// Plain reads do not take the lock; backends guarantee whole-document writes.
pub struct Collection<T> {
    backend: Arc<dyn DocumentBackend>,
    document: &'static str,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn DocumentBackend>, document: &'static str) -> Self {
        Self {
            backend,
            document,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Load every record. A document that was never written is empty.
    pub async fn load(&self) -> StorageResult<Vec<T>> {
        Ok(self.read_items().await?.unwrap_or_default())
    }

    /// Apply `f` to the current records and persist the result if it commits.
    pub async fn modify<R, F>(&self, f: F) -> StorageResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> Change<R>,
    {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_items().await?.unwrap_or_default();
        match f(&mut items) {
            Change::Commit(value) => {
                self.save(&items).await?;
                Ok(value)
            }
            Change::Discard(value) => Ok(value),
        }
    }

    /// Write `items` only if the document does not exist yet.
    ///
    /// Returns whether anything was written.
    pub async fn initialize(&self, items: Vec<T>) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;

        if self.backend.read(self.document).await?.is_some() {
            return Ok(false);
        }

        self.save(&items).await?;
        Ok(true)
    }

    async fn read_items(&self) -> StorageResult<Option<Vec<T>>> {
        let Some(raw) = self.backend.read(self.document).await? else {
            return Ok(None);
        };

        if raw.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                document: self.document.to_string(),
                source,
            })
    }

    async fn save(&self, items: &[T]) -> StorageResult<()> {
        let encoded =
            serde_json::to_string_pretty(items).map_err(|source| StorageError::Encode {
                document: self.document.to_string(),
                source,
            })?;

        self.backend.write(self.document, &encoded).await
    }
}
