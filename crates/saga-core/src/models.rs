//! Core data model for saga-search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// EMBEDDING TYPES
// =============================================================================

/// Embedding vector type (re-exported from pgvector).
pub use pgvector::Vector;

// =============================================================================
// SEARCH REQUEST TYPES
// =============================================================================

/// Which backend comparison column a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Compare against image embeddings only
    Visual,
    /// Compare against text/description embeddings only
    Text,
    /// Compare against the combined embedding column
    #[default]
    Combined,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visual => write!(f, "visual"),
            Self::Text => write!(f, "text"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "text" => Ok(Self::Text),
            "combined" => Ok(Self::Combined),
            _ => Err(format!("Invalid search mode: {}", s)),
        }
    }
}

/// Media kind filter for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(format!("Invalid media kind: {}", s)),
        }
    }
}

/// Availability of an optional collaborator.
///
/// `Disabled` is configuration (the capability was never set up) while
/// `NotReady` is a transient state (configured but not yet usable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Ready,
    NotReady,
    Disabled,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::NotReady => write!(f, "notready"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Normalized search request, independent of the transport it arrived on.
///
/// Exactly one of `query_text` / `query_image` must be set; the orchestrator
/// rejects requests carrying both or neither.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query (any language the embedding model supports)
    pub query_text: Option<String>,
    /// Raw bytes of an uploaded query image
    pub query_image: Option<Vec<u8>>,
    /// Backend comparison column selector
    pub mode: SearchMode,
    /// Maximum number of results (1..=100)
    pub limit: i64,
    /// Minimum similarity score in [0, 1]
    pub threshold: f32,
    /// Restrict results to one media kind
    pub file_type: Option<MediaKind>,
    /// Restrict results to one decade label (e.g. "1960s")
    pub decade: Option<String>,
    /// Translate the query text before encoding
    pub translate: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query_text: None,
            query_image: None,
            mode: SearchMode::default(),
            limit: crate::defaults::SEARCH_LIMIT,
            threshold: crate::defaults::SEARCH_THRESHOLD,
            file_type: None,
            decade: None,
            translate: false,
        }
    }
}

impl SearchRequest {
    /// Create a text-query request with default settings.
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query_text: Some(query.into()),
            ..Self::default()
        }
    }

    /// Create an image-query request with default settings.
    pub fn image(bytes: Vec<u8>) -> Self {
        Self {
            query_image: Some(bytes),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_file_type(mut self, kind: MediaKind) -> Self {
        self.file_type = Some(kind);
        self
    }

    pub fn with_decade(mut self, decade: impl Into<String>) -> Self {
        self.decade = Some(decade.into());
        self
    }

    pub fn with_translate(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }
}

/// The single similarity call sent to the backing store.
#[derive(Debug, Clone)]
pub struct SimilarityQuery {
    pub embedding: Vector,
    pub mode: SearchMode,
    pub file_type: Option<MediaKind>,
    pub decade: Option<String>,
    pub limit: i64,
    pub threshold: f32,
}

// =============================================================================
// SEARCH RESULT TYPES
// =============================================================================

/// Raw candidate row as returned by the similarity store.
///
/// Rows arrive already filtered, thresholded, and ordered by descending
/// similarity. Nothing downstream re-ranks or drops them.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRow {
    pub id: Option<String>,
    pub filename: Option<String>,
    pub original_filename: Option<String>,
    pub file_type: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub storage_path: Option<String>,
    pub thumbnail_path: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub decade: Option<String>,
    pub duration_seconds: Option<f64>,
    pub metadata: Option<JsonValue>,
    pub similarity: f32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public search result with resolved storage URLs.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    /// Bucket-relative path of the full-size media object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    /// Public URL of the full-size media object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
    /// Bucket-relative path of the thumbnail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    /// Public URL of the thumbnail, absent when no thumbnail exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Raw similarity score from the store, passed through unmodified
    pub similarity_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Complete response for one search request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResponse {
    /// Echo of the original query text, absent for image queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Translated query actually encoded, present only when translation applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_query: Option<String>,
    pub search_type: SearchMode,
    pub count: usize,
    pub results: Vec<SearchResult>,
}

// =============================================================================
// HEALTH TYPES
// =============================================================================

/// Composite service health report.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub model_name: String,
    pub backend_connected: bool,
    pub translation_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_default_is_combined() {
        assert_eq!(SearchMode::default(), SearchMode::Combined);
    }

    #[test]
    fn test_search_mode_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SearchMode::Visual).unwrap(),
            "\"visual\""
        );
        let mode: SearchMode = serde_json::from_str("\"combined\"").unwrap();
        assert_eq!(mode, SearchMode::Combined);
    }

    #[test]
    fn test_search_mode_rejects_unknown() {
        let result = serde_json::from_str::<SearchMode>("\"hybrid\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_search_mode_display_from_str_round_trip() {
        for mode in [SearchMode::Visual, SearchMode::Text, SearchMode::Combined] {
            let parsed: SearchMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_search_mode_from_str_case_insensitive() {
        let mode: SearchMode = "VISUAL".parse().unwrap();
        assert_eq!(mode, SearchMode::Visual);
    }

    #[test]
    fn test_search_mode_from_str_invalid() {
        assert!("semantic".parse::<SearchMode>().is_err());
        assert!("".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_media_kind_round_trip() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            let parsed: MediaKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_search_request_defaults() {
        let req = SearchRequest::text("sheep farming");
        assert_eq!(req.query_text.as_deref(), Some("sheep farming"));
        assert!(req.query_image.is_none());
        assert_eq!(req.mode, SearchMode::Combined);
        assert_eq!(req.limit, crate::defaults::SEARCH_LIMIT);
        assert!((req.threshold - crate::defaults::SEARCH_THRESHOLD).abs() < f32::EPSILON);
        assert!(req.file_type.is_none());
        assert!(req.decade.is_none());
        assert!(!req.translate);
    }

    #[test]
    fn test_search_request_builder_chain() {
        let req = SearchRequest::text("hestur")
            .with_mode(SearchMode::Visual)
            .with_limit(5)
            .with_threshold(0.4)
            .with_file_type(MediaKind::Video)
            .with_decade("1970s")
            .with_translate(true);
        assert_eq!(req.mode, SearchMode::Visual);
        assert_eq!(req.limit, 5);
        assert!((req.threshold - 0.4).abs() < f32::EPSILON);
        assert_eq!(req.file_type, Some(MediaKind::Video));
        assert_eq!(req.decade.as_deref(), Some("1970s"));
        assert!(req.translate);
    }

    #[test]
    fn test_search_request_image() {
        let req = SearchRequest::image(vec![0xFF, 0xD8, 0xFF]);
        assert!(req.query_text.is_none());
        assert_eq!(req.query_image.as_deref(), Some(&[0xFF, 0xD8, 0xFF][..]));
    }

    #[test]
    fn test_candidate_row_deserializes_sparse_json() {
        let json = r#"{
            "id": "a1b2c3",
            "filename": "photo.jpg",
            "storage_path": "1960s/photo.jpg",
            "similarity": 0.87
        }"#;
        let row: CandidateRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id.as_deref(), Some("a1b2c3"));
        assert_eq!(row.storage_path.as_deref(), Some("1960s/photo.jpg"));
        assert!((row.similarity - 0.87).abs() < f32::EPSILON);
        assert!(row.thumbnail_path.is_none());
        assert!(row.tags.is_none());
    }

    #[test]
    fn test_search_response_omits_absent_translation() {
        let response = SearchResponse {
            query: Some("bátur".to_string()),
            translated_query: None,
            search_type: SearchMode::Combined,
            count: 0,
            results: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["query"], "bátur");
        assert!(json.get("translated_query").is_none());
        assert_eq!(json["search_type"], "combined");
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn test_search_response_omits_query_for_image_search() {
        let response = SearchResponse {
            query: None,
            translated_query: None,
            search_type: SearchMode::Visual,
            count: 0,
            results: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("query").is_none());
    }

    #[test]
    fn test_search_result_omits_missing_thumbnail() {
        let result = SearchResult {
            id: "x".to_string(),
            filename: None,
            original_filename: None,
            file_type: None,
            mime_type: None,
            file_size: None,
            description: None,
            tags: vec![],
            decade: None,
            duration_seconds: None,
            metadata: None,
            storage_path: Some("m.jpg".to_string()),
            storage_url: Some("https://cdn.example/m.jpg".to_string()),
            thumbnail_path: None,
            thumbnail_url: None,
            similarity_score: 0.5,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("thumbnail_url").is_none());
        assert!(json.get("tags").is_none());
        assert_eq!(json["storage_url"], "https://cdn.example/m.jpg");
    }

    #[test]
    fn test_service_state_display() {
        assert_eq!(ServiceState::Ready.to_string(), "ready");
        assert_eq!(ServiceState::NotReady.to_string(), "notready");
        assert_eq!(ServiceState::Disabled.to_string(), "disabled");
    }
}
