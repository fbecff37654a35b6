//! Annotation query error types.

use thiserror::Error;

use vreview_models::ModelError;

/// Result type for annotation operations.
pub type AnnotationResult<T> = Result<T, AnnotationError>;

/// Errors that can occur while resolving or querying a video's detections.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Invalid video ID: {0}")]
    InvalidVideoId(#[from] ModelError),

    /// No shard file belongs to the requested video.
    #[error("No detection shards found for video {video_id} in {dir}")]
    NotFound { video_id: String, dir: String },

    #[error("Query engine error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl AnnotationError {
    pub fn not_found(video_id: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::NotFound {
            video_id: video_id.into(),
            dir: dir.into(),
        }
    }

    pub fn lock_poisoned(msg: impl Into<String>) -> Self {
        Self::LockPoisoned(msg.into())
    }

    /// Whether the error means the video is unknown to this layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
