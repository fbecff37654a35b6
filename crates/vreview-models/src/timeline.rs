//! Timeline histogram model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest accepted histogram bin width, in seconds.
pub const MIN_BIN_SEC: u32 = 1;

/// Largest accepted histogram bin width, in seconds.
pub const MAX_BIN_SEC: u32 = 60;

/// Detection counts per fixed-width time bin.
///
/// Index `i` covers seconds `[i * bin_sec, (i + 1) * bin_sec)`. The last
/// element is always the highest non-empty bin; gaps are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TimelineHistogram(pub Vec<u64>);

impl TimelineHistogram {
    /// Build a dense histogram from sparse `(bin, count)` pairs.
    pub fn from_sparse(bins: impl IntoIterator<Item = (usize, u64)>) -> Self {
        let mut counts: Vec<u64> = Vec::new();
        for (bin, count) in bins {
            if bin >= counts.len() {
                counts.resize(bin + 1, 0);
            }
            counts[bin] += count;
        }
        Self(counts)
    }

    pub fn counts(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of detections across all bins.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

/// Check a requested bin width against the accepted range.
pub fn is_valid_bin_sec(bin_sec: u32) -> bool {
    (MIN_BIN_SEC..=MAX_BIN_SEC).contains(&bin_sec)
}
