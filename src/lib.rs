//! Mnemo - chat service with semantic memory
//!
//! Persists prior assistant replies as text+vector pairs, retrieves the
//! most relevant one for each new query by cosine similarity, and injects
//! it as context into the generation prompt.

pub mod chat;
pub mod cli;
mod config;
pub mod core;
pub mod memory;
pub mod server;
pub mod storage;
pub mod utils;

pub use crate::chat::ChatOrchestrator;
pub use crate::config::{
    EmbeddingConfig, HistoryConfig, LlmConfig, LoggingConfig, MemoryConfig, ServerConfig, Settings,
};
