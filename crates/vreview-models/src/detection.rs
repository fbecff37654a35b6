//! Detection box models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single detection row in pixel space.
///
/// Coordinates are passed through as stored; no bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionBox {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Unique within a frame; boxes are ordered by it
    pub box_index: i64,
}

impl DetectionBox {
    /// Create a new detection box.
    pub fn new(x: f64, y: f64, width: f64, height: f64, box_index: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            box_index,
        }
    }
}

/// Boxes grouped by frame, frames ascending.
///
/// Frames without detections are absent rather than mapped to an empty list.
pub type FrameBoxes = BTreeMap<i64, Vec<DetectionBox>>;
