//! View cache metrics.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Views registered with the query engine.
    pub const VIEWS_CREATED_TOTAL: &str = "vreview_views_created_total";

    /// View cache lookups by result (`hit` / `miss`).
    pub const VIEW_CACHE_LOOKUPS_TOTAL: &str = "vreview_view_cache_lookups_total";
}

/// Record a cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!(names::VIEW_CACHE_LOOKUPS_TOTAL, "result" => result).increment(1);
}

/// Record a newly registered view and the number of shards it spans.
pub fn record_view_created(shard_count: usize) {
    counter!(
        names::VIEWS_CREATED_TOTAL,
        "multi_shard" => (shard_count > 1).to_string()
    )
    .increment(1);
}
