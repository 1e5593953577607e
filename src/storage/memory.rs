use super::{DocumentStore, StorageError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory document slot. Data is lost when the process terminates;
/// meant for tests and ephemeral runs.
pub struct InMemoryStore {
    document: Arc<RwLock<Option<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            document: Arc::new(RwLock::new(None)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.document.read().await.clone())
    }

    async fn write(&self, contents: &str) -> Result<(), StorageError> {
        *self.document.write().await = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let store = InMemoryStore::new();
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_replaces_the_document() {
        let store = InMemoryStore::new();

        store.write("first").await.unwrap();
        store.write("second").await.unwrap();

        assert_eq!(store.read().await.unwrap().as_deref(), Some("second"));
    }
}
