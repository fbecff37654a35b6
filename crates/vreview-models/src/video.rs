//! Video identifiers and catalog entries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};
use crate::review_log::ReviewStatus;

/// Frame rate shared by every video in the catalog.
pub const DEFAULT_FPS: f64 = 24.0;

/// Maximum identifier length in bytes.
const MAX_VIDEO_ID_LEN: usize = 128;

/// Identifier of a reviewable video.
///
/// Derived from the media filename with its extension stripped. The character
/// set is restricted to ASCII alphanumerics, `_`, `-` and `.` so an identifier
/// can be joined onto a data directory without escaping it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap an identifier.
    pub fn parse(s: impl Into<String>) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError::invalid_video_id("identifier is empty"));
        }
        if s.len() > MAX_VIDEO_ID_LEN {
            return Err(ModelError::invalid_video_id(format!(
                "identifier exceeds {} bytes",
                MAX_VIDEO_ID_LEN
            )));
        }
        if s.starts_with('.') || s.contains("..") {
            return Err(ModelError::invalid_video_id(format!("'{}' is not a plain name", s)));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(ModelError::invalid_video_id(format!(
                "'{}' contains unsupported character {:?}",
                s, c
            )));
        }
        Ok(Self(s))
    }

    /// Derive the identifier from a media file name (`clip_01.mp4` -> `clip_01`).
    pub fn from_media_file_name(file_name: &str) -> ModelResult<Self> {
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        Self::parse(stem)
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the video listing shown in the reviewer's sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoEntry {
    pub video_id: VideoId,
    /// Media file name inside the videos directory
    pub file: String,
    /// URL the browser plays the media from
    pub url: String,
    pub fps: f64,
    /// Derived from the stored review log
    pub status: ReviewStatus,
    pub in_count: i64,
    pub out_count: i64,
}
