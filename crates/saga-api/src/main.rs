//! saga-api - HTTP API server for saga-search

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use saga_core::{
    defaults, EmbeddingBackend, HealthStatus, MediaKind, SearchMode, SearchRequest,
    SearchResponse,
};
use saga_db::SupabaseBackend;
use saga_inference::{ClipBackend, ClipModelRegistry, GoogleTranslateBackend};
use saga_search::{ResultShaper, SearchEngine, StorageUrlResolver};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically and can be
/// matched against log lines after the fact.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Global rate limiter type (direct quota, no keyed bucketing).
type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<SearchEngine>,
    /// Registry of embedding models the sidecar can serve.
    registry: Arc<ClipModelRegistry>,
    /// Active embedding model name and dimension, for /models.
    model_name: String,
    embedding_dimension: usize,
    /// Expected X-API-Key value (None leaves the API unprotected).
    api_key: Option<String>,
    /// Global rate limiter (None if rate limiting is disabled).
    rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

/// OpenAPI documentation served through Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Saga Archive Search API",
        description = "Multilingual semantic search over a historical image and video archive"
    ),
    paths(root, health_check, search_get, search_post, search_image, list_models),
    components(schemas(
        SearchMode,
        MediaKind,
        SearchBody,
        saga_core::SearchResult,
        SearchResponse,
        HealthStatus
    )),
    tags(
        (name = "Info", description = "Service info and health checks"),
        (name = "Search", description = "Text and image similarity search")
    )
)]
struct ApiDoc;

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `CORS_ORIGINS`.
///
/// A comma-separated origin list enables credentialed requests from those
/// origins; the default "*" allows any origin without credentials.
fn cors_layer() -> CorsLayer {
    let origins_str = std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-api-key"),
        ])
        .max_age(std::time::Duration::from_secs(defaults::CORS_MAX_AGE_SECS));

    if origins_str.trim() == "*" {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "saga_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "saga_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("saga-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);

    // Rate limiting configuration
    // RATE_LIMIT_REQUESTS: requests per period (default: 100)
    // RATE_LIMIT_PERIOD_SECS: period in seconds (default: 60)
    let rate_limit_requests: u32 = std::env::var("RATE_LIMIT_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::RATE_LIMIT_REQUESTS);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::RATE_LIMIT_PERIOD_SECS);
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limit_enabled {
            "enabled"
        } else {
            "disabled"
        },
        rate_limit_requests,
        rate_limit_period_secs
    );

    // Embedding backend (readiness is probed lazily on the first search)
    let clip = ClipBackend::from_env();
    let model_name = clip.model_name().to_string();
    let embedding_dimension = clip.dimension();
    info!(
        model = %model_name,
        dimension = embedding_dimension,
        "Embedding backend initialized"
    );

    // Translation backend (degrades to pass-through when no key is set)
    let translator = GoogleTranslateBackend::from_env();

    // Similarity store. Missing credentials start the server in degraded
    // mode: /health reports it and every search returns 503.
    let store = SupabaseBackend::from_env();
    let shaper = match &store {
        Some(supabase) => ResultShaper::new(StorageUrlResolver::new(
            supabase.storage_base(),
            supabase.bucket(),
        )),
        None => {
            warn!("SUPABASE_URL or SUPABASE_KEY not set, search will be unavailable");
            ResultShaper::without_storage()
        }
    };

    let engine = Arc::new(SearchEngine::new(
        Arc::new(clip),
        Some(Arc::new(translator) as Arc<dyn saga_core::TranslationBackend>),
        store.map(|s| Arc::new(s) as Arc<dyn saga_core::SimilarityBackend>),
        shaper,
    ));

    // API key auth
    let api_key = std::env::var("API_KEY").ok().filter(|k| !k.is_empty());
    if api_key.is_none() {
        warn!("API_KEY not set, the API is unprotected");
    }

    let rate_limiter =
        build_rate_limiter(rate_limit_enabled, rate_limit_requests, rate_limit_period_secs);

    let state = AppState {
        engine,
        registry: Arc::new(ClipModelRegistry::new()),
        model_name,
        embedding_dimension,
        api_key,
        rate_limiter,
    };

    // Build router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/search", get(search_get).post(search_post))
        .route("/search/image", post(search_image))
        .route("/models", get(list_models))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_SIZE_BYTES))
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the global rate limiter from operator configuration.
///
/// A zero request count or period cannot form a quota and is treated the
/// same as `RATE_LIMIT_ENABLED=false` rather than refusing to start.
fn build_rate_limiter(
    enabled: bool,
    requests: u32,
    period_secs: u64,
) -> Option<Arc<GlobalRateLimiter>> {
    if !enabled {
        return None;
    }
    let burst = match NonZeroU32::new(requests) {
        Some(b) => b,
        None => {
            warn!("RATE_LIMIT_REQUESTS is 0, rate limiting disabled");
            return None;
        }
    };
    let quota = match Quota::with_period(std::time::Duration::from_secs(period_secs)) {
        Some(q) => q.allow_burst(burst),
        None => {
            warn!("RATE_LIMIT_PERIOD_SECS is 0, rate limiting disabled");
            return None;
        }
    };
    Some(Arc::new(RateLimiter::direct(quota)))
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Paths reachable without an API key.
fn is_public_path(path: &str) -> bool {
    path == "/"
        || path == "/health"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
}

async fn require_api_key(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(expected) = &state.api_key {
        if !is_public_path(request.uri().path()) {
            let provided = request
                .headers()
                .get("x-api-key")
                .and_then(|v| v.to_str().ok());
            if provided != Some(expected.as_str()) {
                return Err(ApiError::Unauthorized("Invalid or missing API key".into()));
            }
        }
    }
    Ok(next.run(request).await)
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // If rate limiting is disabled, pass through
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

fn default_limit() -> i64 {
    defaults::SEARCH_LIMIT
}

fn default_threshold() -> f32 {
    defaults::SEARCH_THRESHOLD
}

/// Query parameters for GET /search and POST /search/image.
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    search_type: SearchMode,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default = "default_threshold")]
    threshold: f32,
    #[serde(default)]
    file_type: Option<MediaKind>,
    #[serde(default)]
    decade: Option<String>,
    #[serde(default)]
    translate: bool,
}

/// JSON body for POST /search.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
struct SearchBody {
    /// Free-text query in any language the model supports
    query: String,
    #[serde(default)]
    search_type: SearchMode,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default = "default_threshold")]
    threshold: f32,
    #[serde(default)]
    file_type: Option<MediaKind>,
    #[serde(default)]
    decade: Option<String>,
    /// Translate the query before encoding (degrades silently on failure)
    #[serde(default)]
    translate: bool,
}

impl SearchBody {
    fn into_request(self) -> SearchRequest {
        SearchRequest {
            query_text: Some(self.query),
            query_image: None,
            mode: self.search_type,
            limit: self.limit,
            threshold: self.threshold,
            file_type: self.file_type,
            decade: self.decade,
            translate: self.translate,
        }
    }
}

impl SearchParams {
    fn into_text_request(self) -> Result<SearchRequest, ApiError> {
        let query = self
            .query
            .ok_or_else(|| ApiError::BadRequest("Missing required parameter: query".into()))?;
        Ok(SearchRequest {
            query_text: Some(query),
            query_image: None,
            mode: self.search_type,
            limit: self.limit,
            threshold: self.threshold,
            file_type: self.file_type,
            decade: self.decade,
            translate: self.translate,
        })
    }

    fn into_image_request(self, image: Vec<u8>) -> SearchRequest {
        SearchRequest {
            query_text: None,
            query_image: Some(image),
            mode: self.search_type,
            limit: self.limit,
            threshold: self.threshold,
            file_type: self.file_type,
            decade: self.decade,
            translate: false,
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Root endpoint with API info.
#[utoipa::path(get, path = "/", tag = "Info",
    responses((status = 200, description = "Service info")))]
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Saga Archive Search API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
        "health": "/health"
    }))
}

/// Composite health check across the embedding, translation, and store backends.
#[utoipa::path(get, path = "/health", tag = "Info",
    responses((status = 200, description = "Health report", body = HealthStatus)))]
async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.engine.health().await)
}

/// Search by text (GET variant).
///
/// Same contract as POST /search but with query parameters.
#[utoipa::path(get, path = "/search", tag = "Search",
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 503, description = "Services not initialized")
    ))]
async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = params.into_text_request()?;
    let response = state.engine.execute(request).await?;
    Ok(Json(response))
}

/// Search by text.
///
/// The query is encoded with the multilingual CLIP model and compared
/// against stored embeddings by cosine similarity. With `translate` set,
/// the query is translated to English first; translation failures fall
/// back to the original text.
#[utoipa::path(post, path = "/search", tag = "Search",
    request_body = SearchBody,
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 503, description = "Services not initialized")
    ))]
async fn search_post(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state.engine.execute(body.into_request()).await?;
    Ok(Json(response))
}

/// Search by uploaded image.
///
/// Accepts multipart/form-data with an `image` field and the usual search
/// parameters on the query string. The upload must be a recognizable image
/// (JPEG, PNG, WebP, GIF).
#[utoipa::path(post, path = "/search/image", tag = "Search",
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Missing or non-image upload"),
        (status = 503, description = "Services not initialized")
    ))]
async fn search_image(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    mut multipart: Multipart,
) -> Result<Json<SearchResponse>, ApiError> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("image") {
            content_type = field.content_type().map(|c| c.to_string());
            image_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = image_bytes
        .ok_or_else(|| ApiError::BadRequest("Missing image in multipart form".to_string()))?;

    // Trust magic bytes over the declared content type
    let looks_like_image = infer::is_image(&bytes)
        || content_type
            .as_deref()
            .map(|c| c.starts_with("image/"))
            .unwrap_or(false);
    if !looks_like_image {
        return Err(ApiError::BadRequest(
            "Uploaded file must be an image".to_string(),
        ));
    }

    let response = state
        .engine
        .execute(params.into_image_request(bytes))
        .await?;
    Ok(Json(response))
}

/// List available embedding models and the active one.
#[utoipa::path(get, path = "/models", tag = "Info",
    responses((status = 200, description = "Model catalog")))]
async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    let available: Vec<serde_json::Value> = state
        .registry
        .list()
        .iter()
        .map(|profile| {
            serde_json::json!({
                "id": profile.name,
                "dimensions": profile.dimension,
                "multilingual": profile.multilingual,
                "description": profile.description,
            })
        })
        .collect();

    Json(serde_json::json!({
        "current_model": state.model_name,
        "embedding_dimension": state.embedding_dimension,
        "available_models": available,
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    ServiceUnavailable(String),
    BadGateway(String),
    Internal(String),
}

impl From<saga_core::Error> for ApiError {
    fn from(err: saga_core::Error) -> Self {
        match err {
            saga_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            saga_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            saga_core::Error::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            saga_core::Error::Backend(msg) => ApiError::BadGateway(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ApiError::from(saga_core::Error::InvalidInput("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(saga_core::Error::Unavailable("x".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(saga_core::Error::Backend("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(saga_core::Error::Unauthorized("x".into())),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(saga_core::Error::Embedding("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_search_params_defaults() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_none());
        assert_eq!(params.search_type, SearchMode::Combined);
        assert_eq!(params.limit, defaults::SEARCH_LIMIT);
        assert!((params.threshold - defaults::SEARCH_THRESHOLD).abs() < f32::EPSILON);
        assert!(!params.translate);
    }

    #[test]
    fn test_search_params_rejects_unknown_mode() {
        let result = serde_json::from_str::<SearchParams>(r#"{"search_type": "hybrid"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_body_into_request() {
        let body: SearchBody = serde_json::from_str(
            r#"{
                "query": "gamall bátur",
                "search_type": "visual",
                "limit": 5,
                "threshold": 0.4,
                "file_type": "video",
                "decade": "1950s",
                "translate": true
            }"#,
        )
        .unwrap();
        let request = body.into_request();
        assert_eq!(request.query_text.as_deref(), Some("gamall bátur"));
        assert_eq!(request.mode, SearchMode::Visual);
        assert_eq!(request.limit, 5);
        assert_eq!(request.file_type, Some(MediaKind::Video));
        assert_eq!(request.decade.as_deref(), Some("1950s"));
        assert!(request.translate);
    }

    #[test]
    fn test_get_params_require_query() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            params.into_text_request(),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_image_request_never_translates() {
        let params: SearchParams = serde_json::from_str(r#"{"translate": true}"#).unwrap();
        let request = params.into_image_request(vec![1, 2, 3]);
        assert!(!request.translate);
        assert_eq!(request.query_image.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_rate_limiter_zero_config_disables() {
        assert!(build_rate_limiter(true, defaults::RATE_LIMIT_REQUESTS, 60).is_some());
        assert!(build_rate_limiter(false, 100, 60).is_none());
        assert!(build_rate_limiter(true, 0, 60).is_none());
        assert!(build_rate_limiter(true, 100, 0).is_none());
    }

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/health"));
        assert!(is_public_path("/docs"));
        assert!(is_public_path("/docs/index.html"));
        assert!(!is_public_path("/search"));
        assert!(!is_public_path("/models"));
    }
}
