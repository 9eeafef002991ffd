//! Search orchestration.
//!
//! `SearchEngine` turns one normalized request into exactly one embedding
//! call and one similarity store call, then shapes the rows into the
//! public response. No retries, no caching, no re-ranking: result quality
//! beyond embedding choice is the store's concern.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use saga_core::{
    EmbeddingBackend, Error, HealthStatus, Result, SearchRequest, SearchResponse, ServiceState,
    SimilarityBackend, SimilarityQuery, TranslationBackend, Vector,
};

use crate::shaper::ResultShaper;

/// Orchestrates validation, translation, encoding, search, and shaping.
pub struct SearchEngine {
    embeddings: Arc<dyn EmbeddingBackend>,
    translator: Option<Arc<dyn TranslationBackend>>,
    store: Option<Arc<dyn SimilarityBackend>>,
    shaper: ResultShaper,
    // Latched on first Ready; the model identity is fixed for the process
    // lifetime, so readiness never regresses.
    model_ready: AtomicBool,
}

impl SearchEngine {
    /// Create an engine over the given collaborators.
    ///
    /// `store: None` models a degraded deployment (similarity store not
    /// configured): the engine constructs fine and refuses each search
    /// with `Error::Unavailable`.
    pub fn new(
        embeddings: Arc<dyn EmbeddingBackend>,
        translator: Option<Arc<dyn TranslationBackend>>,
        store: Option<Arc<dyn SimilarityBackend>>,
        shaper: ResultShaper,
    ) -> Self {
        Self {
            embeddings,
            translator,
            store,
            shaper,
            model_ready: AtomicBool::new(false),
        }
    }

    /// Execute one search request end to end.
    #[instrument(skip(self, request), fields(subsystem = "search", component = "engine", op = "search", search_mode = %request.mode))]
    pub async fn execute(&self, request: SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();

        validate(&request)?;

        let store = self
            .store
            .as_ref()
            .ok_or_else(|| Error::Unavailable("Services not initialized".to_string()))?;

        self.ensure_model_ready().await?;

        // Translation is best-effort: any failure falls back to the
        // original text and the response omits translated_query.
        let mut translated: Option<String> = None;
        if request.translate {
            if let Some(text) = request.query_text.as_deref() {
                translated = self.try_translate(text).await;
            }
        }

        let embedding = self.encode(&request, translated.as_deref()).await?;

        let query = SimilarityQuery {
            embedding,
            mode: request.mode,
            file_type: request.file_type,
            decade: request.decade.clone(),
            limit: request.limit,
            threshold: request.threshold,
        };

        let rows = store.similarity_search(query).await?;
        let results = self.shaper.shape(rows)?;

        let elapsed = start.elapsed().as_millis() as u64;
        info!(
            result_count = results.len(),
            translated = translated.is_some(),
            duration_ms = elapsed,
            "Search complete"
        );

        Ok(SearchResponse {
            query: request.query_text,
            translated_query: translated,
            search_type: request.mode,
            count: results.len(),
            results,
        })
    }

    /// Composite health report over all collaborators.
    pub async fn health(&self) -> HealthStatus {
        let model_loaded = self.model_ready.load(Ordering::Relaxed)
            || self.embeddings.readiness().await == ServiceState::Ready;

        let backend_connected = match &self.store {
            Some(store) => store.health_check().await.unwrap_or(false),
            None => false,
        };

        let translation_available = self
            .translator
            .as_ref()
            .map(|t| t.is_available())
            .unwrap_or(false);

        let status = if model_loaded && backend_connected {
            "healthy"
        } else {
            "degraded"
        };

        HealthStatus {
            status: status.to_string(),
            model_loaded,
            model_name: self.embeddings.model_name().to_string(),
            backend_connected,
            translation_available,
        }
    }

    /// Check embedding readiness, latching the first Ready observation.
    async fn ensure_model_ready(&self) -> Result<()> {
        if self.model_ready.load(Ordering::Relaxed) {
            return Ok(());
        }
        match self.embeddings.readiness().await {
            ServiceState::Ready => {
                self.model_ready.store(true, Ordering::Relaxed);
                Ok(())
            }
            state => Err(Error::Unavailable(format!(
                "Embedding model not ready: {}",
                state
            ))),
        }
    }

    async fn try_translate(&self, text: &str) -> Option<String> {
        let translator = match &self.translator {
            Some(t) if t.is_available() => t,
            _ => {
                debug!("Translation requested but not configured, using original text");
                return None;
            }
        };
        match translator.translate(text).await {
            Ok(translated) => Some(translated),
            Err(e) => {
                warn!(error = %e, "Translation failed, using original text");
                None
            }
        }
    }

    /// Run the single encode call for the request's modality.
    async fn encode(&self, request: &SearchRequest, translated: Option<&str>) -> Result<Vector> {
        if let Some(bytes) = request.query_image.as_deref() {
            return self.embeddings.encode_image(bytes).await;
        }
        // validate() guarantees query_text is present here
        let text = translated.or(request.query_text.as_deref()).ok_or_else(|| {
            Error::Internal("Request passed validation without a query".to_string())
        })?;
        self.embeddings.encode_text(text).await
    }
}

/// Validate a request before any collaborator is touched.
fn validate(request: &SearchRequest) -> Result<()> {
    let has_text = request
        .query_text
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    let has_image = request
        .query_image
        .as_deref()
        .map(|b| !b.is_empty())
        .unwrap_or(false);

    if request.query_text.is_some() && request.query_image.is_some() {
        return Err(Error::InvalidInput(
            "Provide either query text or a query image, not both".to_string(),
        ));
    }
    if request.query_text.is_some() && !has_text {
        return Err(Error::InvalidInput(
            "Query text cannot be empty".to_string(),
        ));
    }
    if request.query_image.is_some() && !has_image {
        return Err(Error::InvalidInput(
            "Query image cannot be empty".to_string(),
        ));
    }
    if !has_text && !has_image {
        return Err(Error::InvalidInput(
            "Provide query text or a query image".to_string(),
        ));
    }
    if request.limit < 1 || request.limit > saga_core::defaults::SEARCH_LIMIT_MAX {
        return Err(Error::InvalidInput(format!(
            "limit must be between 1 and {}",
            saga_core::defaults::SEARCH_LIMIT_MAX
        )));
    }
    if !(0.0..=1.0).contains(&request.threshold) {
        return Err(Error::InvalidInput(
            "threshold must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}
