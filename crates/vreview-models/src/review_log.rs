//! Reviewer session log models.
//!
//! A `VideoLog` is the mutable document a reviewer builds while watching a
//! video: running in/out counts, completion flags, and a timestamped event
//! list. Every field has a serde default, so a stored document missing any
//! field still loads with the full schema and stored values win.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One timestamped reviewer event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogEntry {
    /// Playback position in seconds
    #[serde(rename = "rawTime", default)]
    pub raw_time: f64,
    /// Event kind, e.g. `in` or `out`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Client fields this backend does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogEntry {
    pub fn new(raw_time: f64, kind: impl Into<String>) -> Self {
        Self {
            raw_time,
            kind: kind.into(),
            extra: Map::new(),
        }
    }
}

/// Per-video review session document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoLog {
    #[serde(rename = "in", default)]
    pub in_count: i64,
    #[serde(rename = "out", default)]
    pub out_count: i64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_in_progress: bool,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Top-level client fields this backend does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoLog {
    /// Display status derived from the completion flags.
    pub fn status(&self) -> ReviewStatus {
        if self.is_completed {
            ReviewStatus::Completed
        } else if self.is_in_progress {
            ReviewStatus::InProgress
        } else {
            ReviewStatus::New
        }
    }
}

/// Review status shown in the video listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    New,
    InProgress,
    Completed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::New => "new",
            ReviewStatus::InProgress => "in_progress",
            ReviewStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
