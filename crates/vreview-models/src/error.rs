//! Model validation errors.

use thiserror::Error;

/// Result type for model validation.
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid video ID: {0}")]
    InvalidVideoId(String),
}

impl ModelError {
    pub fn invalid_video_id(msg: impl Into<String>) -> Self {
        Self::InvalidVideoId(msg.into())
    }
}
