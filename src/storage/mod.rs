//! Persistence backends for the memory and history documents.
//!
//! Each store owns exactly one whole document. The backend is injected so
//! production runs against the filesystem while tests run fully in memory,
//! without the stores or the orchestrator changing.

use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

pub use self::filesystem::FileStore;
pub use self::memory::InMemoryStore;

/// Errors surfaced by a [`DocumentStore`] or by decoding its contents.
///
/// Callers decide what a failure means: the orchestrator falls back to an
/// empty collection on load errors and logs save errors instead of
/// propagating them.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single whole-document storage slot.
///
/// `read` returns `Ok(None)` when nothing has been written yet; `write`
/// replaces the full document. There are no partial updates, which keeps
/// the load-mutate-save discipline of the stores honest.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read(&self) -> Result<Option<String>, StorageError>;

    async fn write(&self, contents: &str) -> Result<(), StorageError>;
}
