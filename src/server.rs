//! Thin HTTP surface over the orchestrator.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::chat::ChatOrchestrator;
use crate::memory::MemoryRecord;

const RECENT_MEMORY_LIMIT: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct MemoryStats {
    pub total: usize,
    pub recent: Vec<MemoryRecord>,
}

#[derive(Debug, Serialize)]
pub struct ClearReply {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusReply {
    pub status: String,
    pub memory_entries: usize,
    pub model: String,
}

pub fn router(state: AppState) -> Router {
    // The reference UI is a browser app on another origin; stay permissive.
    Router::new()
        .route("/chat", post(chat))
        .route("/memory", get(memory))
        .route("/clear", get(clear))
        .route("/", get(status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = state.orchestrator.handle(&request.message).await;
    Json(ChatReply { reply })
}

async fn memory(State(state): State<AppState>) -> Json<MemoryStats> {
    let (total, recent) = state.orchestrator.memory_stats(RECENT_MEMORY_LIMIT).await;
    Json(MemoryStats { total, recent })
}

async fn clear(State(state): State<AppState>) -> Json<ClearReply> {
    state.orchestrator.clear_all().await;
    Json(ClearReply {
        message: "Memory cleared".to_string(),
    })
}

async fn status(State(state): State<AppState>) -> Json<StatusReply> {
    let (memory_entries, _) = state.orchestrator.memory_stats(0).await;
    Json(StatusReply {
        status: "running".to_string(),
        memory_entries,
        model: state.model.clone(),
    })
}
