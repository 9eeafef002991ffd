//! # saga-search
//!
//! Search orchestration and result shaping for saga-search.
//!
//! This crate provides:
//! - `SearchEngine`: validation, optional translation, one embedding call,
//!   one similarity store call, response assembly
//! - `ResultShaper` / `StorageUrlResolver`: raw row to public result mapping

pub mod engine;
pub mod shaper;

pub use engine::SearchEngine;
pub use shaper::{ResultShaper, StorageUrlResolver};
