//! Centralized default constants for the saga-search system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// EMBEDDING
// =============================================================================

/// Default embedding model name (multilingual CLIP, covers Icelandic queries).
pub const EMBED_MODEL: &str = "clip-ViT-B-32-multilingual-v1";

/// Default embedding vector dimension for the multilingual CLIP model.
pub const EMBED_DIMENSION: usize = 512;

/// Default embedding sidecar base URL.
pub const EMBED_URL: &str = "http://127.0.0.1:8100";

/// Timeout for embedding requests in seconds.
pub const EMBED_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SEARCH
// =============================================================================

/// Default number of results per search.
pub const SEARCH_LIMIT: i64 = 20;

/// Maximum accepted result limit per search.
pub const SEARCH_LIMIT_MAX: i64 = 100;

/// Default minimum similarity score (0 = no filtering).
pub const SEARCH_THRESHOLD: f32 = 0.0;

// =============================================================================
// TRANSLATION
// =============================================================================

/// Default translation source language (Icelandic).
pub const TRANSLATE_SOURCE: &str = "is";

/// Default translation target language (embedding model's strongest language).
pub const TRANSLATE_TARGET: &str = "en";

/// Timeout for translation requests in seconds.
pub const TRANSLATE_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// SIMILARITY STORE
// =============================================================================

/// Default storage bucket holding the media files.
pub const STORAGE_BUCKET: &str = "media-files";

/// Timeout for similarity store requests in seconds.
pub const STORE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Default rate limit: max requests per period (u32, feeds `NonZeroU32`).
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (20 MB, bounds image uploads).
pub const MAX_BODY_SIZE_BYTES: usize = 20 * 1024 * 1024;
