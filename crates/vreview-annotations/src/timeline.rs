//! Timeline histogram binning.

use duckdb::params;
use tracing::warn;

use vreview_models::TimelineHistogram;

use crate::error::AnnotationResult;
use crate::view::ViewHandle;

/// Count detection rows per `bin_sec`-second bin across the whole view.
///
/// Each row counts once, so a frame with three boxes adds three. The result
/// runs from bin 0 to the last non-empty bin with zero-filled gaps; an empty
/// view gives an empty histogram. `bin_sec` is expected to be pre-validated
/// to `[1, 60]`.
pub fn histogram(view: &ViewHandle, bin_sec: u32) -> AnnotationResult<TimelineHistogram> {
    let sql = format!(
        r#"
        WITH s AS (
            SELECT CAST(FLOOR(frame / CAST(? AS DOUBLE)) AS BIGINT) AS sec
            FROM {}
        )
        SELECT CAST(FLOOR(sec / CAST(? AS DOUBLE)) AS BIGINT) AS bin, COUNT(*) AS cnt
        FROM s
        GROUP BY bin
        ORDER BY bin
        "#,
        view.relation()
    );

    let rows: Vec<(i64, i64)> = view.db().with_conn(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![view.fps(), f64::from(bin_sec)], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        rows.collect()
    })?;

    let mut dropped = 0u64;
    let bins = rows.into_iter().filter_map(|(bin, count)| {
        let count = count.max(0) as u64;
        match usize::try_from(bin) {
            Ok(bin) => Some((bin, count)),
            Err(_) => {
                dropped += count;
                None
            }
        }
    });
    let histogram = TimelineHistogram::from_sparse(bins.collect::<Vec<_>>());

    if dropped > 0 {
        warn!(
            video_id = %view.video_id(),
            dropped,
            "Detections before frame 0 left out of the timeline"
        );
    }

    Ok(histogram)
}
