//! Result shaping: raw store rows to public search results.
//!
//! Shaping is pure presentation. Scores pass through unmodified, row
//! order is preserved, and nothing is filtered out. The only hard
//! failure is a row without an id, which indicates store corruption and
//! fails the whole batch rather than silently dropping rows.

use saga_core::{CandidateRow, Error, Result, SearchResult};

/// Builds public URLs for objects in the storage bucket.
#[derive(Debug, Clone)]
pub struct StorageUrlResolver {
    base: String,
    bucket: String,
}

impl StorageUrlResolver {
    pub fn new(base: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
        }
    }

    /// Public URL for a storage path within the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base, self.bucket, path
        )
    }
}

/// Maps candidate rows into the public result shape.
#[derive(Debug, Clone)]
pub struct ResultShaper {
    resolver: Option<StorageUrlResolver>,
}

impl ResultShaper {
    /// Shaper with URL resolution for the given storage configuration.
    pub fn new(resolver: StorageUrlResolver) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// Shaper without URL resolution (no storage configured).
    pub fn without_storage() -> Self {
        Self { resolver: None }
    }

    /// Shape a batch of rows, preserving their order.
    pub fn shape(&self, rows: Vec<CandidateRow>) -> Result<Vec<SearchResult>> {
        rows.into_iter().map(|row| self.shape_row(row)).collect()
    }

    fn shape_row(&self, row: CandidateRow) -> Result<SearchResult> {
        let id = row
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::InvalidInput("Store returned a row without an id".to_string()))?;

        let resolve = |path: &Option<String>| -> Option<String> {
            match (&self.resolver, path) {
                (Some(resolver), Some(p)) if !p.is_empty() => Some(resolver.public_url(p)),
                _ => None,
            }
        };
        let storage_url = resolve(&row.storage_path);
        // Never falls back to the full-size URL
        let thumbnail_url = resolve(&row.thumbnail_path);

        Ok(SearchResult {
            id,
            filename: row.filename,
            original_filename: row.original_filename,
            file_type: row.file_type,
            mime_type: row.mime_type,
            file_size: row.file_size,
            description: row.description,
            tags: row.tags.unwrap_or_default(),
            decade: row.decade,
            duration_seconds: row.duration_seconds,
            metadata: row.metadata,
            storage_path: row.storage_path,
            storage_url,
            thumbnail_path: row.thumbnail_path,
            thumbnail_url,
            similarity_score: row.similarity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
