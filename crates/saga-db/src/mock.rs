//! Mock similarity store for deterministic testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use saga_core::{CandidateRow, Error, Result, SimilarityBackend, SimilarityQuery};

/// Mock similarity store with preset rows and a recorded query log.
#[derive(Clone)]
pub struct MockSimilarityBackend {
    rows: Vec<CandidateRow>,
    fail: bool,
    healthy: bool,
    queries: Arc<Mutex<Vec<SimilarityQuery>>>,
}

impl MockSimilarityBackend {
    /// Create a store returning no rows.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            fail: false,
            healthy: true,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Preset the rows every search returns, in order.
    pub fn with_rows(mut self, rows: Vec<CandidateRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Make every search call fail.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Make the health probe report down.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// The most recent query, for interaction assertions.
    pub fn last_query(&self) -> Option<SimilarityQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    /// Number of search calls made.
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Build a minimal candidate row for tests.
    pub fn row(id: &str, storage_path: &str, similarity: f32) -> CandidateRow {
        CandidateRow {
            id: Some(id.to_string()),
            filename: Some(format!("{}.jpg", id)),
            original_filename: None,
            file_type: Some("image".to_string()),
            mime_type: Some("image/jpeg".to_string()),
            file_size: Some(1024),
            storage_path: Some(storage_path.to_string()),
            thumbnail_path: None,
            description: None,
            tags: None,
            decade: None,
            duration_seconds: None,
            metadata: None,
            similarity,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Default for MockSimilarityBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimilarityBackend for MockSimilarityBackend {
    async fn similarity_search(&self, query: SimilarityQuery) -> Result<Vec<CandidateRow>> {
        self.queries.lock().unwrap().push(query);
        if self.fail {
            return Err(Error::Backend("Simulated store failure".to_string()));
        }
        Ok(self.rows.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.healthy)
    }
}
