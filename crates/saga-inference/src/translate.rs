//! Google Translate v2 backend implementation.
//!
//! Translates query text (Icelandic by default) into the embedding
//! model's strongest language before encoding. The trait contract is
//! best-effort: callers fall back to the original text on any failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use saga_core::{Error, Result, TranslationBackend};

/// Google Translate v2 REST endpoint.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Timeout for translation requests (seconds).
pub const TRANSLATE_TIMEOUT_SECS: u64 = saga_core::defaults::TRANSLATE_TIMEOUT_SECS;

/// Google Translate backend.
///
/// Created with `api_key: None` when `GOOGLE_TRANSLATE_API_KEY` is unset;
/// `is_available()` then reports false and every `translate` call fails
/// with `Error::Unavailable`.
pub struct GoogleTranslateBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    source: String,
    target: String,
}

impl GoogleTranslateBackend {
    /// Create a backend with an explicit API key (or none, disabling it).
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_config(
            DEFAULT_TRANSLATE_URL.to_string(),
            api_key,
            saga_core::defaults::TRANSLATE_SOURCE.to_string(),
            saga_core::defaults::TRANSLATE_TARGET.to_string(),
        )
    }

    /// Create a backend with full configuration (base URL override is for tests).
    pub fn with_config(
        base_url: String,
        api_key: Option<String>,
        source: String,
        target: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TRANSLATE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        if api_key.is_none() {
            warn!("GOOGLE_TRANSLATE_API_KEY not set, translation disabled");
        } else {
            info!("Translation enabled: {} -> {}", source, target);
        }

        Self {
            client,
            base_url,
            api_key,
            source,
            target,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").ok();
        let source = std::env::var("TRANSLATE_SOURCE")
            .unwrap_or_else(|_| saga_core::defaults::TRANSLATE_SOURCE.to_string());
        let target = std::env::var("TRANSLATE_TARGET")
            .unwrap_or_else(|_| saga_core::defaults::TRANSLATE_TARGET.to_string());

        Self::with_config(DEFAULT_TRANSLATE_URL.to_string(), api_key, source, target)
    }
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "translate", op = "translate"))]
    async fn translate(&self, text: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Unavailable("Translation API key not configured".to_string()))?;

        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let start = Instant::now();

        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("key", api_key),
                ("q", text),
                ("source", self.source.as_str()),
                ("target", self.target.as_str()),
                ("format", "text"),
            ])
            .send()
            .await
            .map_err(|e| Error::Translation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Translation(format!(
                "Translate API returned {}: {}",
                status, body
            )));
        }

        let result: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("Failed to parse response: {}", e)))?;

        let translated = result
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| Error::Translation("Empty translations array".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(duration_ms = elapsed, "Translation complete");

        Ok(translated)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}
