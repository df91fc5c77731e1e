//! Object storage for scrubgate.
//!
//! Uploaded files and their derived records are stored as opaque objects
//! under `/`-separated keys (`raw/...`, `processed/...`). The backends
//! here cover local development and deployment on a plain disk; nothing
//! in this crate inspects object contents.

pub mod backend;
pub mod error;

pub use backend::filesystem::FilesystemBackend;
pub use backend::memory::MemoryBackend;
pub use backend::{StorageBackend, StoredObject};
pub use error::{StorageError, StorageResult};
