//! Document storage for template and quick reply collections.
//!
//! Each collection is persisted as a single JSON array document. Backends
//! only know how to read and write whole documents by name; the typed
//! [`Collection`] wrapper handles (de)serialization and serialises
//! read-modify-write cycles so concurrent mutations never lose updates.

mod backend;
mod collection;
mod factory;
mod file_backend;
mod memory_backend;

pub use backend::{DocumentBackend, StorageError, StorageResult};
pub use collection::{Change, Collection};
pub use factory::create_document_backend;
pub use file_backend::JsonFileBackend;
pub use memory_backend::MemoryBackend;
