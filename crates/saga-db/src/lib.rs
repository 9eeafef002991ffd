//! # saga-db
//!
//! Similarity store adapter for saga-search.
//!
//! This crate provides:
//! - Supabase PostgREST backend implementing `SimilarityBackend`
//! - Deterministic mock store for testing (feature `mock`)

pub mod supabase;

// Mock store for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use supabase::SupabaseBackend;
