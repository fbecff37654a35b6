//! Detection annotation query layer.
//!
//! This crate provides:
//! - Shard discovery for a video's Parquet detection files
//! - A view cache that registers one DuckDB view per video, once
//! - Exact-frame and frame-range box retrieval
//! - Timeline histogram binning
//! - Next/previous hit search

pub mod boxes;
pub mod db;
pub mod error;
pub mod hits;
pub mod metrics;
pub mod shard;
pub mod timeline;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use boxes::{boxes_at, boxes_in_range, detection_count};
pub use db::AnnotationDb;
pub use error::{AnnotationError, AnnotationResult};
pub use hits::{next_hit, prev_hit};
pub use shard::{discover_shards, shard_owner, ShardSet};
pub use timeline::histogram;
pub use view::{AnnotationConfig, RelationName, ViewCache, ViewHandle};
