use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mnemo::chat::ChatOrchestrator;
use mnemo::cli::{Cli, Commands};
use mnemo::core::embeddings::GeminiEmbeddings;
use mnemo::core::llm::GeminiClient;
use mnemo::memory::retrieval::LinearScanRetriever;
use mnemo::memory::store::{HistoryLog, MemoryStore};
use mnemo::server::{self, AppState};
use mnemo::storage::FileStore;
use mnemo::{utils, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => handle_serve(settings, host, port).await,
        Commands::Clear => handle_clear(settings).await,
    }
}

async fn handle_serve(settings: Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    let api_key = Settings::api_key()?;

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    utils::banner(
        "Mnemo chat server",
        &[
            format!("Model: {}", settings.llm.model),
            format!("Memory file: {}", settings.memory.memory_file),
            format!("Listening on http://{host}:{port}"),
        ],
    );

    let state = AppState {
        model: settings.llm.model.clone(),
        orchestrator: Arc::new(build_orchestrator(&settings, api_key)),
    };

    server::serve(state, &host, port).await
}

async fn handle_clear(settings: Settings) -> Result<()> {
    let (memory, history) = build_stores(&settings);

    memory.clear().await?;
    history.clear().await?;

    utils::print_success("Memory cleared");
    Ok(())
}

fn build_stores(settings: &Settings) -> (MemoryStore, HistoryLog) {
    let memory = MemoryStore::new(
        Arc::new(FileStore::new(&settings.memory.memory_file)),
        settings.memory.text_truncation,
    );
    let history = HistoryLog::new(
        Arc::new(FileStore::new(&settings.memory.history_file)),
        settings.history.retention,
    );
    (memory, history)
}

fn build_orchestrator(settings: &Settings, api_key: String) -> ChatOrchestrator {
    let embeddings = Arc::new(GeminiEmbeddings::new(
        api_key.clone(),
        settings.embedding.clone(),
    ));
    let generator = Arc::new(GeminiClient::new(api_key, settings.llm.clone()));
    let retriever = Arc::new(LinearScanRetriever::new(
        embeddings.clone(),
        settings.memory.similarity_threshold,
        settings.memory.context_truncation,
    ));

    let (memory, history) = build_stores(settings);

    ChatOrchestrator::new(
        memory,
        history,
        retriever,
        embeddings,
        generator,
        settings.memory.reply_min_chars,
    )
}
