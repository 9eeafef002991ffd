//! Integration tests for the Google Translate backend wire format.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saga_core::{Error, TranslationBackend};
use saga_inference::GoogleTranslateBackend;

fn backend_for(server: &MockServer) -> GoogleTranslateBackend {
    GoogleTranslateBackend::with_config(
        format!("{}/language/translate/v2", server.uri()),
        Some("test-key".to_string()),
        "is".to_string(),
        "en".to_string(),
    )
}

#[tokio::test]
async fn translate_sends_query_params_and_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "hestur"))
        .and(query_param("source", "is"))
        .and(query_param("target", "en"))
        .and(query_param("format", "text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "translations": [
                    { "translatedText": "horse" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let translated = backend.translate("hestur").await.unwrap();
    assert_eq!(translated, "horse");
}

#[tokio::test]
async fn translate_maps_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "Daily limit exceeded" }
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.translate("hestur").await;
    match result {
        Err(Error::Translation(msg)) => assert!(msg.contains("403")),
        other => panic!("Expected Translation error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn translate_rejects_empty_translations_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "translations": [] }
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.translate("hestur").await;
    assert!(matches!(result, Err(Error::Translation(_))));
}
