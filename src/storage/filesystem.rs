use super::{DocumentStore, StorageError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Filesystem-backed document slot: one JSON file, rewritten whole on save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[FileStore] no document at {:?}", self.path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(&self.path, contents).await?;
        tracing::debug!(
            "[FileStore] wrote {} bytes to {:?}",
            contents.len(),
            self.path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("doc.json"));

        store.write("[1, 2, 3]").await.unwrap();
        let contents = store.read().await.unwrap();

        assert_eq!(contents.as_deref(), Some("[1, 2, 3]"));
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("absent.json"));

        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn document_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");

        {
            let store = FileStore::new(path.clone());
            store.write("\"persistent\"").await.unwrap();
        }

        {
            let store = FileStore::new(path);
            let contents = store.read().await.unwrap();
            assert_eq!(contents.as_deref(), Some("\"persistent\""));
        }
    }
}
