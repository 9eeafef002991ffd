//! CLIP inference sidecar backend implementation.
//!
//! Talks to the embedding sidecar that hosts the CLIP model. Text and
//! image queries are projected into the same vector space, so either
//! modality can be searched against any stored embedding column.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use saga_core::{EmbeddingBackend, Error, Result, ServiceState, Vector};

use crate::models::ClipModelRegistry;

/// Default embedding sidecar endpoint.
pub const DEFAULT_CLIP_URL: &str = saga_core::defaults::EMBED_URL;

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = saga_core::defaults::EMBED_MODEL;

/// Default embedding dimension for the multilingual CLIP model.
pub const DEFAULT_DIMENSION: usize = saga_core::defaults::EMBED_DIMENSION;

/// Timeout for embedding requests (seconds).
pub const EMBED_TIMEOUT_SECS: u64 = saga_core::defaults::EMBED_TIMEOUT_SECS;

/// CLIP embedding backend.
pub struct ClipBackend {
    client: Client,
    base_url: String,
    model: String,
    dimension: usize,
    registry: ClipModelRegistry,
    embed_timeout_secs: u64,
}

impl ClipBackend {
    /// Create a new CLIP backend with default settings.
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_CLIP_URL.to_string(),
            DEFAULT_EMBED_MODEL.to_string(),
            DEFAULT_DIMENSION,
        )
    }

    /// Create a new CLIP backend with custom configuration.
    pub fn with_config(base_url: String, model: String, dimension: usize) -> Self {
        let embed_timeout = std::env::var("SAGA_EMBED_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(saga_core::defaults::EMBED_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(embed_timeout))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing CLIP backend: url={}, model={}, dimension={}",
            base_url, model, dimension
        );

        Self {
            client,
            base_url,
            model,
            dimension,
            registry: ClipModelRegistry::new(),
            embed_timeout_secs: embed_timeout,
        }
    }

    /// Create from environment variables.
    ///
    /// `CLIP_EMBED_DIM` overrides the registry dimension; otherwise the
    /// dimension follows the configured model's known profile.
    pub fn from_env() -> Self {
        let base_url = std::env::var("CLIP_URL").unwrap_or_else(|_| DEFAULT_CLIP_URL.to_string());
        let model = std::env::var("CLIP_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());
        let dimension = std::env::var("CLIP_EMBED_DIM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| ClipModelRegistry::new().get_or_default(&model).dimension);

        Self::with_config(base_url, model, dimension)
    }

    /// Get the model registry.
    pub fn registry(&self) -> &ClipModelRegistry {
        &self.registry
    }
}

impl Default for ClipBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct EncodeTextRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EncodeTextResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct EncodeImageRequest {
    model: String,
    /// Base64-encoded image bytes
    image: String,
}

#[derive(Deserialize)]
struct EncodeImageResponse {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct SidecarHealth {
    model_loaded: bool,
    #[allow(dead_code)]
    model: Option<String>,
}

#[async_trait]
impl EmbeddingBackend for ClipBackend {
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "clip", op = "encode_text", model = %self.model))]
    async fn encode_text(&self, text: &str) -> Result<Vector> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("Cannot encode empty text".to_string()));
        }

        let start = Instant::now();

        let request = EncodeTextRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/encode/text", self.base_url))
            .timeout(Duration::from_secs(self.embed_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Encoder returned {}: {}",
                status, body
            )));
        }

        let result: EncodeTextResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse response: {}", e)))?;

        let embedding = result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("Encoder returned no embeddings".to_string()))?;

        if embedding.len() != self.dimension {
            return Err(Error::Embedding(format!(
                "Expected dimension {}, got {}",
                self.dimension,
                embedding.len()
            )));
        }

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            dimension = embedding.len(),
            duration_ms = elapsed,
            "Text encoding complete"
        );
        if elapsed > 5000 {
            warn!(duration_ms = elapsed, slow = true, "Slow text encoding");
        }

        Ok(Vector::from(embedding))
    }

    #[instrument(skip(self, bytes), fields(subsystem = "inference", component = "clip", op = "encode_image", model = %self.model, image_bytes = bytes.len()))]
    async fn encode_image(&self, bytes: &[u8]) -> Result<Vector> {
        if bytes.is_empty() {
            return Err(Error::InvalidInput(
                "Cannot encode empty image payload".to_string(),
            ));
        }

        let start = Instant::now();

        let request = EncodeImageRequest {
            model: self.model.clone(),
            image: base64::engine::general_purpose::STANDARD.encode(bytes),
        };

        let response = self
            .client
            .post(format!("{}/encode/image", self.base_url))
            .timeout(Duration::from_secs(self.embed_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Encoder returned {}: {}",
                status, body
            )));
        }

        let result: EncodeImageResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse response: {}", e)))?;

        if result.embedding.len() != self.dimension {
            return Err(Error::Embedding(format!(
                "Expected dimension {}, got {}",
                self.dimension,
                result.embedding.len()
            )));
        }

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            dimension = result.embedding.len(),
            duration_ms = elapsed,
            "Image encoding complete"
        );
        if elapsed > 5000 {
            warn!(
                duration_ms = elapsed,
                image_bytes = bytes.len(),
                slow = true,
                "Slow image encoding"
            );
        }

        Ok(Vector::from(result.embedding))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn readiness(&self) -> ServiceState {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<SidecarHealth>().await {
                Ok(health) if health.model_loaded => ServiceState::Ready,
                Ok(_) => {
                    debug!("Encoder reachable, model still loading");
                    ServiceState::NotReady
                }
                Err(e) => {
                    warn!("Encoder health response unparseable: {}", e);
                    ServiceState::NotReady
                }
            },
            Ok(resp) => {
                warn!("Encoder health check failed: {}", resp.status());
                ServiceState::NotReady
            }
            Err(e) => {
                warn!("Encoder health check error: {}", e);
                ServiceState::NotReady
            }
        }
    }
}
