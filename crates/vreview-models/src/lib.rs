//! Shared data models for the detection review backend.
//!
//! This crate provides Serde-serializable types for:
//! - Validated video identifiers and catalog entries
//! - Detection boxes and frame-keyed box mappings
//! - Timeline histograms
//! - Reviewer session logs and their derived status

pub mod detection;
pub mod error;
pub mod review_log;
pub mod timeline;
pub mod video;

// Re-export common types
pub use detection::{DetectionBox, FrameBoxes};
pub use error::{ModelError, ModelResult};
pub use review_log::{LogEntry, ReviewStatus, VideoLog};
pub use timeline::{is_valid_bin_sec, TimelineHistogram, MAX_BIN_SEC, MIN_BIN_SEC};
pub use video::{VideoEntry, VideoId, DEFAULT_FPS};
