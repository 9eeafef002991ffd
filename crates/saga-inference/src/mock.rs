//! Mock backends for deterministic testing.
//!
//! Provides mock implementations of the embedding and translation traits
//! that generate deterministic output and record every call, so tests can
//! assert on interaction counts as well as results.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use saga_core::{
    EmbeddingBackend, Error, Result, ServiceState, TranslationBackend, Vector,
};

/// One recorded call against a mock backend.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

/// Mock embedding backend for testing.
#[derive(Clone)]
pub struct MockClipBackend {
    dimension: usize,
    model: String,
    readiness: ServiceState,
    fail: bool,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockClipBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            dimension: saga_core::defaults::EMBED_DIMENSION,
            model: "mock-clip".to_string(),
            readiness: ServiceState::Ready,
            fail: false,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Make every encode call fail.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Override the reported readiness state.
    pub fn with_readiness(mut self, state: ServiceState) -> Self {
        self.readiness = state;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of text encode calls.
    pub fn text_call_count(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "encode_text")
            .count()
    }

    /// Get number of image encode calls.
    pub fn image_call_count(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "encode_image")
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }
}

impl Default for MockClipBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingBackend for MockClipBackend {
    async fn encode_text(&self, text: &str) -> Result<Vector> {
        self.log_call("encode_text", text);
        if self.fail {
            return Err(Error::Embedding("Simulated encoder failure".to_string()));
        }
        Ok(Vector::from(MockEmbeddingGenerator::generate(
            text,
            self.dimension,
        )))
    }

    async fn encode_image(&self, bytes: &[u8]) -> Result<Vector> {
        self.log_call("encode_image", &format!("{} bytes", bytes.len()));
        if self.fail {
            return Err(Error::Embedding("Simulated encoder failure".to_string()));
        }
        // Deterministic on content length and first bytes
        let seed = bytes.iter().take(8).map(|b| *b as u64).sum::<u64>() + bytes.len() as u64;
        Ok(Vector::from(MockEmbeddingGenerator::generate_with_seed(
            seed,
            self.dimension,
        )))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn readiness(&self) -> ServiceState {
        self.readiness
    }
}

/// Mock translation backend for testing.
#[derive(Clone)]
pub struct MockTranslationBackend {
    available: bool,
    fail: bool,
    prefix: String,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockTranslationBackend {
    /// Create an available mock translator that prefixes translations
    /// with "translated:" for easy assertion.
    pub fn new() -> Self {
        Self {
            available: true,
            fail: false,
            prefix: "translated:".to_string(),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mark the translator as unconfigured.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Make every translate call fail.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get number of translate calls.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

impl Default for MockTranslationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationBackend for MockTranslationBackend {
    async fn translate(&self, text: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: "translate".to_string(),
            input: text.to_string(),
        });
        if !self.available {
            return Err(Error::Unavailable(
                "Translation API key not configured".to_string(),
            ));
        }
        if self.fail {
            return Err(Error::Translation(
                "Simulated translation failure".to_string(),
            ));
        }
        Ok(format!("{}{}", self.prefix, text))
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Mock embedding generator with deterministic output.
pub struct MockEmbeddingGenerator;

impl MockEmbeddingGenerator {
    /// Generate a deterministic embedding from text.
    ///
    /// Uses character-based hashing for reproducibility. The same text
    /// will always produce the same embedding.
    pub fn generate(text: &str, dimension: usize) -> Vec<f32> {
        let mut vec = vec![0.0; dimension];

        for (i, c) in text.chars().enumerate() {
            let idx = (c as usize + i) % dimension;
            vec[idx] += 0.1;
        }

        Self::normalize(&mut vec);
        vec
    }

    /// Generate embedding from seed (for random-like but deterministic vectors).
    pub fn generate_with_seed(seed: u64, dimension: usize) -> Vec<f32> {
        let mut vec = vec![0.0; dimension];
        let mut state = seed;

        // Simple LCG for deterministic pseudo-random values
        for item in vec.iter_mut() {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            *item = ((state % 1000) as f32) / 1000.0 - 0.5;
        }

        Self::normalize(&mut vec);
        vec
    }

    fn normalize(vec: &mut [f32]) {
        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            vec.iter_mut().for_each(|x| *x /= magnitude);
        }
    }
}
