//! Core traits for saga-search abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// EMBEDDING TRAITS
// =============================================================================

/// Backend for projecting queries into the shared embedding space.
///
/// Text and image embeddings land in the same space so that either modality
/// can be compared against any stored column. The model identity is fixed
/// for the lifetime of the backend.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Encode a text query into an embedding vector.
    async fn encode_text(&self, text: &str) -> Result<Vector>;

    /// Encode raw image bytes into an embedding vector.
    async fn encode_image(&self, bytes: &[u8]) -> Result<Vector>;

    /// Get the expected dimension of embedding vectors.
    fn dimension(&self) -> usize;

    /// Get the model name being used.
    fn model_name(&self) -> &str;

    /// Report whether the model is loaded and able to serve requests.
    async fn readiness(&self) -> ServiceState;
}

// =============================================================================
// TRANSLATION TRAITS
// =============================================================================

/// Backend for translating query text before encoding.
///
/// Translation is strictly best-effort: callers fall back to the original
/// text on any failure and never abort a search because of it.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate the given text into the embedding model's target language.
    async fn translate(&self, text: &str) -> Result<String>;

    /// Whether the backend is configured and usable at all.
    fn is_available(&self) -> bool;
}

// =============================================================================
// SIMILARITY STORE TRAITS
// =============================================================================

/// Backend executing the single similarity search call.
///
/// The store owns filtering, thresholding, and ordering. Rows come back
/// ranked by descending similarity and are not re-ranked downstream.
#[async_trait]
pub trait SimilarityBackend: Send + Sync {
    /// Run one similarity search and return the ordered candidate rows.
    async fn similarity_search(&self, query: SimilarityQuery) -> Result<Vec<CandidateRow>>;

    /// Check if the store is reachable and responding.
    async fn health_check(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_objects_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}

        assert_send_sync::<dyn EmbeddingBackend>();
        assert_send_sync::<dyn TranslationBackend>();
        assert_send_sync::<dyn SimilarityBackend>();
    }
}
