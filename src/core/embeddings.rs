use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EmbeddingConfig;

/// Embedding collaborator.
///
/// Infallible by contract: any transport, API or decode failure yields a
/// zero-vector of the configured dimension. A zero-vector never matches
/// during retrieval (cosine similarity 0), so downstream similarity stays
/// total without special-casing failed embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Vec<f32>;

    fn dimension(&self) -> usize;
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

pub struct GeminiEmbeddings {
    client: Client,
    api_key: String,
    config: EmbeddingConfig,
}

impl GeminiEmbeddings {
    pub fn new(api_key: String, config: EmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: format!("models/{}", self.config.model),
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Embedding API error {}: {}", status, error_text);
        }

        let parsed: EmbedResponse = response.json().await?;
        Ok(parsed.embedding.values)
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddings {
    async fn embed(&self, text: &str) -> Vec<f32> {
        match self.request_embedding(text).await {
            // Every stored vector must share the configured dimension, so a
            // short or oversized response degrades like a failure.
            Ok(values) if values.len() == self.config.dimension => values,
            Ok(values) => {
                warn!(
                    "[GeminiEmbeddings] unexpected embedding dimension {} (expected {})",
                    values.len(),
                    self.config.dimension
                );
                vec![0.0; self.config.dimension]
            }
            Err(e) => {
                warn!("[GeminiEmbeddings] embedding failed: {:#}", e);
                vec![0.0; self.config.dimension]
            }
        }
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
