use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::embeddings::EmbeddingProvider;

use super::similarity::cosine_similarity;
use super::MemoryRecord;

/// Strategy seam for relevance lookup, so an indexed or approximate
/// variant can replace the scan without touching the orchestrator.
#[async_trait]
pub trait RetrievalStrategy: Send + Sync {
    /// Returns an injectable context annotation, or the empty string when
    /// nothing in the store qualifies.
    async fn find_relevant(&self, query: &str, records: &[MemoryRecord]) -> String;
}

/// Exhaustive scan over every record, O(n * d) per query.
///
/// The store is expected to stay small; unbounded growth is a known
/// limitation of the design, not something this strategy works around.
pub struct LinearScanRetriever {
    embeddings: Arc<dyn EmbeddingProvider>,
    similarity_threshold: f32,
    context_truncation: usize,
}

impl LinearScanRetriever {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        similarity_threshold: f32,
        context_truncation: usize,
    ) -> Self {
        Self {
            embeddings,
            similarity_threshold,
            context_truncation,
        }
    }
}

#[async_trait]
impl RetrievalStrategy for LinearScanRetriever {
    async fn find_relevant(&self, query: &str, records: &[MemoryRecord]) -> String {
        if records.is_empty() {
            return String::new();
        }

        let query_vector = self.embeddings.embed(query).await;

        let mut best: Option<&MemoryRecord> = None;
        let mut best_score = 0.0f32;

        for record in records {
            let score = cosine_similarity(&query_vector, &record.vector);
            // Both comparisons strict: a score at the threshold does not
            // qualify, and an earlier record keeps a tied score.
            if score > self.similarity_threshold && score > best_score {
                best_score = score;
                best = Some(record);
            }
        }

        match best {
            Some(record) => {
                info!("Found relevant context (score: {:.3})", best_score);
                let snippet: String = record.text.chars().take(self.context_truncation).collect();
                format!("[Related to previous conversation: {snippet}]")
            }
            None => String::new(),
        }
    }
}
