//! The per-request chat transaction.

use std::sync::Arc;

use tracing::warn;

use crate::core::embeddings::EmbeddingProvider;
use crate::core::llm::TextGenerator;
use crate::memory::retrieval::RetrievalStrategy;
use crate::memory::store::{HistoryLog, MemoryStore};
use crate::memory::{HistoryTurn, MemoryRecord, Role};

pub const EMPTY_MESSAGE_REPLY: &str = "Please type a message.";
pub const NO_CANDIDATES_REPLY: &str = "I couldn't generate a response. Please try again.";
pub const RATE_LIMIT_REPLY: &str = "API limit reached. Try again later.";

const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant.";

/// Composes history, retrieval, generation and memorisation into one
/// self-contained read-mutate-write transaction per request.
///
/// The orchestrator holds no state of its own between calls: each request
/// reconstructs working copies from the backing stores, mutates them and
/// writes them back. Every failure path resolves to a best-effort textual
/// reply; nothing here is fatal to the process.
pub struct ChatOrchestrator {
    memory: MemoryStore,
    history: HistoryLog,
    retriever: Arc<dyn RetrievalStrategy>,
    embeddings: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
    reply_min_chars: usize,
}

impl ChatOrchestrator {
    pub fn new(
        memory: MemoryStore,
        history: HistoryLog,
        retriever: Arc<dyn RetrievalStrategy>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
        reply_min_chars: usize,
    ) -> Self {
        Self {
            memory,
            history,
            retriever,
            embeddings,
            generator,
            reply_min_chars,
        }
    }

    /// Handle one user message end to end and return the reply text.
    pub async fn handle(&self, user_message: &str) -> String {
        let user_message = user_message.trim();
        if user_message.is_empty() {
            return EMPTY_MESSAGE_REPLY.to_string();
        }

        let memory = self.memory.load().await.unwrap_or_else(|e| {
            warn!("Memory store unreadable, starting empty: {e}");
            Vec::new()
        });
        let mut history = self.history.load().await.unwrap_or_else(|e| {
            warn!("History unreadable, starting empty: {e}");
            Vec::new()
        });

        self.history.append(
            &mut history,
            HistoryTurn {
                role: Role::User,
                content: user_message.to_string(),
            },
        );

        let context = self.retriever.find_relevant(user_message, &memory).await;
        let prompt = build_prompt(&context, user_message);

        let reply = match self.generator.generate(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_CANDIDATES_REPLY.to_string(),
            Err(e) => classify_generation_error(&e, user_message),
        };

        self.history.append(
            &mut history,
            HistoryTurn {
                role: Role::Assistant,
                content: reply.clone(),
            },
        );
        if let Err(e) = self.history.save(&history).await {
            warn!("History save failed, most recent turns lost: {e}");
        }

        // Short replies are not memorised: a relevance heuristic carried
        // over as a configurable default, not a size limit.
        if reply.chars().count() > self.reply_min_chars {
            let vector = self.embeddings.embed(&reply).await;
            let mut memory = memory;
            self.memory.append(&mut memory, &reply, vector);
            if let Err(e) = self.memory.save(&memory).await {
                warn!("Memory save failed, most recent record lost: {e}");
            }
        }

        reply
    }

    /// Store size plus the most recent records, for the status surface.
    pub async fn memory_stats(&self, recent: usize) -> (usize, Vec<MemoryRecord>) {
        let memory = self.memory.load().await.unwrap_or_else(|e| {
            warn!("Memory store unreadable, reporting empty: {e}");
            Vec::new()
        });

        let total = memory.len();
        let start = total.saturating_sub(recent);
        (total, memory[start..].to_vec())
    }

    /// Reset both stores to empty. Failures are logged, not surfaced.
    pub async fn clear_all(&self) {
        if let Err(e) = self.memory.clear().await {
            warn!("Memory clear failed: {e}");
        }
        if let Err(e) = self.history.clear().await {
            warn!("History clear failed: {e}");
        }
    }
}

fn build_prompt(context: &str, user_message: &str) -> String {
    format!(
        "{SYSTEM_INSTRUCTION}\n\n{context}\n\nUser: {user_message}\n\n\
         Answer in a helpful, natural way. If the context above is relevant, \
         use it. Otherwise just answer normally."
    )
}

fn classify_generation_error(error: &anyhow::Error, user_message: &str) -> String {
    let error_text = format!("{error:#}");
    warn!("Generation failed: {error_text}");

    if error_text.contains("429") {
        RATE_LIMIT_REPLY.to_string()
    } else {
        format!("I'm having trouble. You asked: '{user_message}'")
    }
}
