//! Integration tests for the search orchestrator against mock backends.
//!
//! These tests assert on the engine's observable contract: how many times
//! each collaborator is called, what the store receives, and what the
//! response carries.

use std::sync::Arc;

use saga_core::{Error, MediaKind, SearchMode, SearchRequest, ServiceState};
use saga_db::mock::MockSimilarityBackend;
use saga_inference::mock::{MockClipBackend, MockTranslationBackend};
use saga_search::{ResultShaper, SearchEngine, StorageUrlResolver};

fn shaper() -> ResultShaper {
    ResultShaper::new(StorageUrlResolver::new(
        "https://proj.supabase.co",
        "media-files",
    ))
}

fn engine_with(
    clip: MockClipBackend,
    translator: Option<MockTranslationBackend>,
    store: Option<MockSimilarityBackend>,
) -> SearchEngine {
    SearchEngine::new(
        Arc::new(clip),
        translator.map(|t| Arc::new(t) as Arc<dyn saga_core::TranslationBackend>),
        store.map(|s| Arc::new(s) as Arc<dyn saga_core::SimilarityBackend>),
        shaper(),
    )
}

#[tokio::test]
async fn text_search_encodes_exactly_once_and_searches_exactly_once() {
    let clip = MockClipBackend::new();
    let store = MockSimilarityBackend::new()
        .with_rows(vec![MockSimilarityBackend::row("a", "a.jpg", 0.9)]);
    let engine = engine_with(clip.clone(), None, Some(store.clone()));

    let response = engine.execute(SearchRequest::text("bátur")).await.unwrap();

    assert_eq!(clip.text_call_count(), 1);
    assert_eq!(clip.image_call_count(), 0);
    assert_eq!(store.call_count(), 1);
    assert_eq!(response.count, 1);
    assert_eq!(response.query.as_deref(), Some("bátur"));
}

#[tokio::test]
async fn image_search_uses_image_encoder_and_omits_query_echo() {
    let clip = MockClipBackend::new();
    let store = MockSimilarityBackend::new();
    let engine = engine_with(clip.clone(), None, Some(store.clone()));

    let response = engine
        .execute(SearchRequest::image(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .await
        .unwrap();

    assert_eq!(clip.image_call_count(), 1);
    assert_eq!(clip.text_call_count(), 0);
    assert!(response.query.is_none());
    assert!(response.translated_query.is_none());
}

#[tokio::test]
async fn results_preserve_store_order_and_scores() {
    let store = MockSimilarityBackend::new().with_rows(vec![
        MockSimilarityBackend::row("first", "1.jpg", 0.95),
        MockSimilarityBackend::row("second", "2.jpg", 0.92),
    ]);
    let engine = engine_with(MockClipBackend::new(), None, Some(store));

    // The store enforces the threshold server-side; everything it returns
    // is kept as-is.
    let response = engine
        .execute(SearchRequest::text("hestur").with_threshold(0.9))
        .await
        .unwrap();

    assert_eq!(response.count, 2);
    assert_eq!(response.results[0].id, "first");
    assert_eq!(response.results[1].id, "second");
    assert!((response.results[0].similarity_score - 0.95).abs() < f32::EPSILON);
    assert!((response.results[1].similarity_score - 0.92).abs() < f32::EPSILON);
}

#[tokio::test]
async fn count_always_equals_results_len() {
    let engine = engine_with(
        MockClipBackend::new(),
        None,
        Some(MockSimilarityBackend::new()),
    );
    let response = engine.execute(SearchRequest::text("tómt")).await.unwrap();
    assert_eq!(response.count, 0);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn both_modalities_rejected_before_any_collaborator_call() {
    let clip = MockClipBackend::new();
    let translator = MockTranslationBackend::new();
    let store = MockSimilarityBackend::new();
    let engine = engine_with(clip.clone(), Some(translator.clone()), Some(store.clone()));

    let mut request = SearchRequest::text("bátur").with_translate(true);
    request.query_image = Some(vec![1, 2, 3]);

    let result = engine.execute(request).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(clip.get_calls().len(), 0);
    assert_eq!(translator.call_count(), 0);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn out_of_range_limit_rejected_before_any_collaborator_call() {
    let clip = MockClipBackend::new();
    let store = MockSimilarityBackend::new();
    let engine = engine_with(clip.clone(), None, Some(store.clone()));

    for limit in [0, 101, -5] {
        let result = engine
            .execute(SearchRequest::text("bátur").with_limit(limit))
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
    assert_eq!(clip.get_calls().len(), 0);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn store_receives_request_parameters_unchanged() {
    let store = MockSimilarityBackend::new();
    let engine = engine_with(MockClipBackend::new(), None, Some(store.clone()));

    engine
        .execute(
            SearchRequest::text("síld")
                .with_mode(SearchMode::Visual)
                .with_limit(7)
                .with_threshold(0.33)
                .with_file_type(MediaKind::Video)
                .with_decade("1950s"),
        )
        .await
        .unwrap();

    let query = store.last_query().unwrap();
    assert_eq!(query.mode, SearchMode::Visual);
    assert_eq!(query.limit, 7);
    assert!((query.threshold - 0.33).abs() < f32::EPSILON);
    assert_eq!(query.file_type, Some(MediaKind::Video));
    assert_eq!(query.decade.as_deref(), Some("1950s"));
}

#[tokio::test]
async fn translation_applied_encodes_translated_text() {
    let clip = MockClipBackend::new();
    let translator = MockTranslationBackend::new();
    let engine = engine_with(
        clip.clone(),
        Some(translator.clone()),
        Some(MockSimilarityBackend::new()),
    );

    let response = engine
        .execute(SearchRequest::text("hestur").with_translate(true))
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 1);
    assert_eq!(
        response.translated_query.as_deref(),
        Some("translated:hestur")
    );
    assert_eq!(response.query.as_deref(), Some("hestur"));
    // The encoder saw the translated text, not the original
    let calls = clip.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].input, "translated:hestur");
}

#[tokio::test]
async fn translation_not_requested_never_calls_translator() {
    let translator = MockTranslationBackend::new();
    let engine = engine_with(
        MockClipBackend::new(),
        Some(translator.clone()),
        Some(MockSimilarityBackend::new()),
    );

    let response = engine.execute(SearchRequest::text("hestur")).await.unwrap();

    assert_eq!(translator.call_count(), 0);
    assert!(response.translated_query.is_none());
}

#[tokio::test]
async fn translation_failure_degrades_to_original_text() {
    let clip = MockClipBackend::new();
    let translator = MockTranslationBackend::new().with_failure();
    let engine = engine_with(
        clip.clone(),
        Some(translator.clone()),
        Some(MockSimilarityBackend::new()),
    );

    let response = engine
        .execute(SearchRequest::text("hestur").with_translate(true))
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 1);
    assert!(response.translated_query.is_none());
    assert_eq!(clip.get_calls()[0].input, "hestur");
}

#[tokio::test]
async fn translation_unavailable_degrades_without_calling_it() {
    let translator = MockTranslationBackend::unavailable();
    let engine = engine_with(
        MockClipBackend::new(),
        Some(translator.clone()),
        Some(MockSimilarityBackend::new()),
    );

    let response = engine
        .execute(SearchRequest::text("hestur").with_translate(true))
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 0);
    assert!(response.translated_query.is_none());
}

#[tokio::test]
async fn image_search_never_translates() {
    let translator = MockTranslationBackend::new();
    let engine = engine_with(
        MockClipBackend::new(),
        Some(translator.clone()),
        Some(MockSimilarityBackend::new()),
    );

    engine
        .execute(SearchRequest::image(vec![1, 2, 3]).with_translate(true))
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn missing_store_fails_with_unavailable() {
    let clip = MockClipBackend::new();
    let engine = engine_with(clip.clone(), None, None);

    let result = engine.execute(SearchRequest::text("bátur")).await;
    assert!(matches!(result, Err(Error::Unavailable(_))));
    // The encoder is never touched on a degraded deployment
    assert_eq!(clip.get_calls().len(), 0);
}

#[tokio::test]
async fn not_ready_model_fails_with_unavailable() {
    let clip = MockClipBackend::new().with_readiness(ServiceState::NotReady);
    let engine = engine_with(clip.clone(), None, Some(MockSimilarityBackend::new()));

    let result = engine.execute(SearchRequest::text("bátur")).await;
    assert!(matches!(result, Err(Error::Unavailable(_))));
    assert_eq!(clip.get_calls().len(), 0);
}

#[tokio::test]
async fn store_failure_propagates_as_backend_error() {
    let engine = engine_with(
        MockClipBackend::new(),
        None,
        Some(MockSimilarityBackend::new().with_failure()),
    );

    let result = engine.execute(SearchRequest::text("bátur")).await;
    assert!(matches!(result, Err(Error::Backend(_))));
}

#[tokio::test]
async fn encoder_failure_propagates_as_embedding_error() {
    let store = MockSimilarityBackend::new();
    let engine = engine_with(
        MockClipBackend::new().with_failure(),
        None,
        Some(store.clone()),
    );

    let result = engine.execute(SearchRequest::text("bátur")).await;
    assert!(matches!(result, Err(Error::Embedding(_))));
    // The store is never reached when encoding fails
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn search_type_echoes_requested_mode() {
    let engine = engine_with(
        MockClipBackend::new(),
        None,
        Some(MockSimilarityBackend::new()),
    );

    for mode in [SearchMode::Visual, SearchMode::Text, SearchMode::Combined] {
        let response = engine
            .execute(SearchRequest::text("q").with_mode(mode))
            .await
            .unwrap();
        assert_eq!(response.search_type, mode);
    }
}

#[tokio::test]
async fn health_reports_composite_state() {
    let engine = engine_with(
        MockClipBackend::new(),
        Some(MockTranslationBackend::new()),
        Some(MockSimilarityBackend::new()),
    );
    let health = engine.health().await;
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert!(health.backend_connected);
    assert!(health.translation_available);
    assert_eq!(health.model_name, "mock-clip");
}

#[tokio::test]
async fn health_degraded_without_store() {
    let engine = engine_with(
        MockClipBackend::new(),
        Some(MockTranslationBackend::unavailable()),
        None,
    );
    let health = engine.health().await;
    assert_eq!(health.status, "degraded");
    assert!(!health.backend_connected);
    assert!(!health.translation_available);
}

#[tokio::test]
async fn readiness_is_latched_after_first_ready() {
    // Readiness is consulted on the first request; later requests rely on
    // the latch and still succeed against the same engine.
    let clip = MockClipBackend::new();
    let engine = engine_with(clip.clone(), None, Some(MockSimilarityBackend::new()));

    engine.execute(SearchRequest::text("a")).await.unwrap();
    engine.execute(SearchRequest::text("b")).await.unwrap();
    assert_eq!(clip.text_call_count(), 2);
}
