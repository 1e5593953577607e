use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub memory: MemoryConfig,
    pub history: HistoryConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub base_url: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub similarity_threshold: f32,
    pub text_truncation: usize,
    pub context_truncation: usize,
    pub reply_min_chars: usize,
    pub memory_file: String,
    pub history_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub retention: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// Layered load: built-in defaults, then `config/{CONFIG_ENV}.toml`
    /// (optional), then `MNEMO__`-prefixed environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .set_default("llm.model", "gemini-2.5-flash")?
            .set_default("llm.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("embedding.model", "embedding-001")?
            .set_default("embedding.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("embedding.dimension", 768)?
            .set_default("memory.similarity_threshold", 0.8)?
            .set_default("memory.text_truncation", 400)?
            .set_default("memory.context_truncation", 300)?
            .set_default("memory.reply_min_chars", 20)?
            .set_default("memory.memory_file", "memory.json")?
            .set_default("memory.history_file", "conversation_history.json")?
            .set_default("history.retention", 50)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("MNEMO").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn api_key() -> Result<String> {
        env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))
    }
}
