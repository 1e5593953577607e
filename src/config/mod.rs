mod settings;

pub use self::settings::{
    EmbeddingConfig, HistoryConfig, LlmConfig, LoggingConfig, MemoryConfig, ServerConfig, Settings,
};
