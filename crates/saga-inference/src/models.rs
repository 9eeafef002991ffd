//! CLIP model configuration and registry.
//!
//! Provides known CLIP model profiles with dimension and capability
//! metadata. The active model is fixed at startup; the registry exists
//! so the API can report which models a deployment may be configured
//! with and so dimensions never have to be guessed at call sites.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Known CLIP model profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipModelProfile {
    /// Model name as served by the inference sidecar
    pub name: String,
    /// Output vector dimension
    pub dimension: usize,
    /// Whether the text encoder handles non-English queries well
    pub multilingual: bool,
    /// Brief description
    pub description: String,
}

/// Registry of known CLIP models.
pub struct ClipModelRegistry {
    models: HashMap<String, ClipModelProfile>,
}

impl ClipModelRegistry {
    /// Create a new registry with all known CLIP models.
    pub fn new() -> Self {
        let mut models = HashMap::new();

        models.insert(
            "clip-ViT-B-32-multilingual-v1".to_string(),
            ClipModelProfile {
                name: "clip-ViT-B-32-multilingual-v1".to_string(),
                dimension: 512,
                multilingual: true,
                description: "Multilingual CLIP ViT-B/32: text encoder distilled for 50+ languages (512d)".to_string(),
            },
        );

        models.insert(
            "clip-ViT-B-32".to_string(),
            ClipModelProfile {
                name: "clip-ViT-B-32".to_string(),
                dimension: 512,
                multilingual: false,
                description: "Original CLIP ViT-B/32: English-only, fastest (512d)".to_string(),
            },
        );

        models.insert(
            "clip-ViT-L-14".to_string(),
            ClipModelProfile {
                name: "clip-ViT-L-14".to_string(),
                dimension: 768,
                multilingual: false,
                description: "CLIP ViT-L/14: higher visual fidelity, English-only (768d)".to_string(),
            },
        );

        models.insert(
            "xlm-roberta-large-ViT-H-14".to_string(),
            ClipModelProfile {
                name: "xlm-roberta-large-ViT-H-14".to_string(),
                dimension: 1024,
                multilingual: true,
                description: "OpenCLIP ViT-H/14 with XLM-RoBERTa text tower (1024d)".to_string(),
            },
        );

        Self { models }
    }

    /// Look up a model profile by name.
    pub fn get(&self, name: &str) -> Option<&ClipModelProfile> {
        self.models.get(name)
    }

    /// Look up a model profile, falling back to the default model's profile.
    pub fn get_or_default(&self, name: &str) -> ClipModelProfile {
        self.models
            .get(name)
            .or_else(|| self.models.get(saga_core::defaults::EMBED_MODEL))
            .cloned()
            .unwrap_or(ClipModelProfile {
                name: name.to_string(),
                dimension: saga_core::defaults::EMBED_DIMENSION,
                multilingual: false,
                description: "Unknown model".to_string(),
            })
    }

    /// All known profiles, ordered by name for stable output.
    pub fn list(&self) -> Vec<&ClipModelProfile> {
        let mut profiles: Vec<_> = self.models.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }
}

impl Default for ClipModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
