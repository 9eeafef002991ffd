//! # saga-inference
//!
//! Embedding and translation backend adapters for saga-search.
//!
//! This crate provides:
//! - CLIP sidecar backend implementing `EmbeddingBackend`
//! - Google Translate v2 backend implementing `TranslationBackend`
//! - Known CLIP model profiles and registry
//! - Deterministic mock backends for testing (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use saga_inference::ClipBackend;
//! use saga_core::EmbeddingBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = ClipBackend::from_env();
//!     let embedding = backend.encode_text("northern lights").await.unwrap();
//!     assert_eq!(embedding.as_slice().len(), backend.dimension());
//! }
//! ```

pub mod clip;
pub mod models;
pub mod translate;

// Mock backends for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use clip::ClipBackend;
pub use models::{ClipModelProfile, ClipModelRegistry};
pub use translate::GoogleTranslateBackend;
