//! Box retrieval against a registered view.

use duckdb::params;

use vreview_models::{DetectionBox, FrameBoxes};

use crate::error::AnnotationResult;
use crate::view::ViewHandle;

/// Boxes detected on exactly `frame`, ordered by `box_index`.
///
/// A frame without detections yields an empty list.
pub fn boxes_at(view: &ViewHandle, frame: i64) -> AnnotationResult<Vec<DetectionBox>> {
    let sql = format!(
        "SELECT x, y, width, height, box_index FROM {} WHERE frame = ? ORDER BY box_index",
        view.relation()
    );

    view.db().with_conn(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![frame], |row| {
            Ok(DetectionBox {
                x: row.get(0)?,
                y: row.get(1)?,
                width: row.get(2)?,
                height: row.get(3)?,
                box_index: row.get(4)?,
            })
        })?;
        rows.collect()
    })
}

/// Boxes for every frame in `[start, end]`, grouped by frame.
///
/// Bounds given in reverse order are swapped. Frames without detections do
/// not appear in the result.
pub fn boxes_in_range(view: &ViewHandle, start: i64, end: i64) -> AnnotationResult<FrameBoxes> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    let sql = format!(
        "SELECT frame, x, y, width, height, box_index FROM {} \
         WHERE frame BETWEEN ? AND ? ORDER BY frame, box_index",
        view.relation()
    );

    let rows: Vec<(i64, DetectionBox)> = view.db().with_conn(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok((
                row.get(0)?,
                DetectionBox {
                    x: row.get(1)?,
                    y: row.get(2)?,
                    width: row.get(3)?,
                    height: row.get(4)?,
                    box_index: row.get(5)?,
                },
            ))
        })?;
        rows.collect()
    })?;

    let mut out = FrameBoxes::new();
    for (frame, b) in rows {
        out.entry(frame).or_default().push(b);
    }
    Ok(out)
}

/// Total number of detection rows in the view.
pub fn detection_count(view: &ViewHandle) -> AnnotationResult<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", view.relation());
    let count: i64 = view
        .db()
        .with_conn(|conn| conn.query_row(&sql, [], |row| row.get(0)))?;
    Ok(count.max(0) as u64)
}
