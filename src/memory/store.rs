use std::sync::Arc;

use crate::storage::{DocumentStore, StorageError};

use super::{HistoryTurn, MemoryRecord};

/// Persisted sequence of [`MemoryRecord`]s behind a [`DocumentStore`].
///
/// Every request follows a load-mutate-save transaction over a fresh
/// working copy; nothing stays resident in between. There is deliberately
/// no lock around that transaction: two concurrent requests both load size
/// `n`, both append, and the second save wins, silently losing one record.
/// The backend seam is where a locking or versioned implementation would
/// slot in if that ever becomes unacceptable.
pub struct MemoryStore {
    backend: Arc<dyn DocumentStore>,
    text_truncation: usize,
}

impl MemoryStore {
    pub fn new(backend: Arc<dyn DocumentStore>, text_truncation: usize) -> Self {
        Self {
            backend,
            text_truncation,
        }
    }

    /// Full read of the persisted collection. `Ok` with an empty vector
    /// when no document exists yet; `Err` on unreadable contents so the
    /// caller can choose the empty fallback.
    pub async fn load(&self) -> Result<Vec<MemoryRecord>, StorageError> {
        match self.backend.read().await? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a record to a working copy. The id is the current length of
    /// the copy; text is kept to the configured character limit.
    pub fn append(&self, records: &mut Vec<MemoryRecord>, text: &str, vector: Vec<f32>) {
        records.push(MemoryRecord {
            id: records.len() as u64,
            text: truncate_chars(text, self.text_truncation),
            vector,
        });
    }

    /// Overwrite the backing document with the working copy.
    pub async fn save(&self, records: &[MemoryRecord]) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(records)?;
        self.backend.write(&contents).await
    }

    /// Reset to zero records and persist immediately.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.save(&[]).await
    }
}

/// Persisted conversation log with the same transaction discipline (and
/// the same lost-update caveat) as [`MemoryStore`].
pub struct HistoryLog {
    backend: Arc<dyn DocumentStore>,
    retention: usize,
}

impl HistoryLog {
    pub fn new(backend: Arc<dyn DocumentStore>, retention: usize) -> Self {
        Self { backend, retention }
    }

    pub async fn load(&self) -> Result<Vec<HistoryTurn>, StorageError> {
        match self.backend.read().await? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn append(&self, turns: &mut Vec<HistoryTurn>, turn: HistoryTurn) {
        turns.push(turn);
    }

    /// Persists only the most recent `retention` turns; older ones are
    /// silently discarded, not archived.
    pub async fn save(&self, turns: &[HistoryTurn]) -> Result<(), StorageError> {
        let start = turns.len().saturating_sub(self.retention);
        let contents = serde_json::to_string_pretty(&turns[start..])?;
        self.backend.write(&contents).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.save(&[]).await
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Role;
    use crate::storage::InMemoryStore;

    fn memory_store() -> MemoryStore {
        MemoryStore::new(Arc::new(InMemoryStore::new()), 400)
    }

    fn turn(role: Role, content: &str) -> HistoryTurn {
        HistoryTurn {
            role,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn append_assigns_ordinal_ids() {
        let store = memory_store();
        let mut records = Vec::new();

        for i in 0..5 {
            store.append(&mut records, &format!("record {i}"), vec![0.0; 3]);
        }

        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.id, i as u64);
        }
    }

    #[tokio::test]
    async fn append_truncates_on_character_boundaries() {
        let store = MemoryStore::new(Arc::new(InMemoryStore::new()), 4);
        let mut records = Vec::new();

        store.append(&mut records, "héllo wörld", vec![0.0; 2]);

        assert_eq!(records[0].text, "héll");
    }

    #[tokio::test]
    async fn save_and_load_round_trips() {
        let store = memory_store();
        let mut records = Vec::new();
        store.append(&mut records, "remember me", vec![0.25, -0.5]);

        store.save(&records).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "remember me");
        assert_eq!(loaded[0].vector, vec![0.25, -0.5]);
    }

    #[tokio::test]
    async fn load_of_missing_document_is_empty() {
        let store = memory_store();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_of_corrupt_document_is_an_error() {
        let backend = Arc::new(InMemoryStore::new());
        backend.write("{ not json").await.unwrap();

        let store = MemoryStore::new(backend, 400);
        assert!(matches!(
            store.load().await,
            Err(StorageError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn clear_persists_an_empty_store() {
        let store = memory_store();
        let mut records = Vec::new();
        store.append(&mut records, "transient", vec![1.0]);
        store.save(&records).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_save_keeps_only_the_most_recent_turns() {
        let log = HistoryLog::new(Arc::new(InMemoryStore::new()), 50);
        let mut turns = Vec::new();

        for i in 0..60 {
            log.append(&mut turns, turn(Role::User, &format!("turn {i}")));
        }
        log.save(&turns).await.unwrap();

        let reloaded = log.load().await.unwrap();
        assert_eq!(reloaded.len(), 50);
        assert_eq!(reloaded[0].content, "turn 10");
        assert_eq!(reloaded[49].content, "turn 59");
    }

    #[tokio::test]
    async fn history_shorter_than_retention_is_kept_whole() {
        let log = HistoryLog::new(Arc::new(InMemoryStore::new()), 50);
        let mut turns = Vec::new();

        log.append(&mut turns, turn(Role::User, "hello"));
        log.append(&mut turns, turn(Role::Assistant, "hi"));
        log.save(&turns).await.unwrap();

        let reloaded = log.load().await.unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].role, Role::User);
        assert_eq!(reloaded[1].role, Role::Assistant);
    }
}
