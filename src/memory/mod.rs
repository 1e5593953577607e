//! The semantic memory subsystem: record types, the persisted stores, the
//! similarity metric and the relevance-retrieval strategy.

pub mod retrieval;
pub mod similarity;
pub mod store;

use serde::{Deserialize, Serialize};

/// One memorised assistant reply with its embedding.
///
/// `vector` always has the embedding dimension, even when the embedding
/// call failed (a zero-vector), so similarity stays well-defined across
/// the whole store. `id` is the store length at append time: monotonic and
/// never reused, though not necessarily contiguous if the backing document
/// is edited by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: u64,
    pub text: String,
    pub vector: Vec<f32>,
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the persisted conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub content: String,
}
