//! Supabase PostgREST similarity store implementation.
//!
//! Executes the single `search_media_by_embedding` RPC against a managed
//! Supabase project. The database function owns filtering, thresholding,
//! and ordering; rows come back ranked by descending similarity.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use saga_core::{CandidateRow, Error, Result, SimilarityBackend, SimilarityQuery};

/// Timeout for similarity store requests (seconds).
pub const STORE_TIMEOUT_SECS: u64 = saga_core::defaults::STORE_TIMEOUT_SECS;

/// Supabase PostgREST similarity store.
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseBackend {
    /// Create a new Supabase backend.
    pub fn new(base_url: String, api_key: String) -> Self {
        let bucket = std::env::var("SUPABASE_BUCKET")
            .unwrap_or_else(|_| saga_core::defaults::STORAGE_BUCKET.to_string());
        Self::with_config(base_url, api_key, bucket)
    }

    /// Create a new Supabase backend with an explicit storage bucket.
    pub fn with_config(base_url: String, api_key: String, bucket: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(STORE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        info!("Supabase client initialized for: {}", base_url);

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        }
    }

    /// Create from environment variables, or `None` when unconfigured.
    ///
    /// A missing `SUPABASE_URL`/`SUPABASE_KEY` pair means the deployment
    /// runs degraded: the service boots, but every search is refused.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok()?;
        let key = std::env::var("SUPABASE_KEY").ok()?;
        Some(Self::new(url, key))
    }

    /// Base URL of the project, used for storage URL construction.
    pub fn storage_base(&self) -> &str {
        &self.base_url
    }

    /// Storage bucket holding the media files.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// RPC argument body for `search_media_by_embedding`.
///
/// Absent filters are serialized as explicit nulls; the database function
/// declares them as nullable parameters.
#[derive(Serialize)]
struct SearchRpcArgs {
    query_embedding: Vec<f32>,
    search_type: String,
    match_threshold: f32,
    match_count: i64,
    file_type_filter: Option<String>,
    decade_filter: Option<String>,
}

#[async_trait]
impl SimilarityBackend for SupabaseBackend {
    #[instrument(skip(self, query), fields(subsystem = "db", component = "supabase", op = "similarity_search", search_mode = %query.mode))]
    async fn similarity_search(&self, query: SimilarityQuery) -> Result<Vec<CandidateRow>> {
        let start = Instant::now();

        let args = SearchRpcArgs {
            query_embedding: query.embedding.as_slice().to_vec(),
            search_type: query.mode.to_string(),
            match_threshold: query.threshold,
            match_count: query.limit,
            file_type_filter: query.file_type.map(|k| k.to_string()),
            decade_filter: query.decade,
        };

        let response = self
            .client
            .post(format!(
                "{}/rest/v1/rpc/search_media_by_embedding",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&args)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!(
                "Store returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<CandidateRow> = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("Failed to parse rows: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            result_count = rows.len(),
            duration_ms = elapsed,
            "Similarity search complete"
        );
        if elapsed > 5000 {
            warn!(duration_ms = elapsed, slow = true, "Slow similarity search");
        }

        Ok(rows)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!(
                "{}/rest/v1/media_items?select=id&limit=1",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    Ok(true)
                } else {
                    warn!("Store health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("Store health check error: {}", e);
                Ok(false)
            }
        }
    }
}
