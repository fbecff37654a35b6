//! Nearest-hit search.
//!
//! A hit is a frame with at least one detection.

use duckdb::params;

use crate::error::AnnotationResult;
use crate::view::ViewHandle;

/// Smallest hit frame strictly after `frame`.
pub fn next_hit(view: &ViewHandle, frame: i64) -> AnnotationResult<Option<i64>> {
    let sql = format!("SELECT MIN(frame) FROM {} WHERE frame > ?", view.relation());
    view.db()
        .with_conn(|conn| conn.query_row(&sql, params![frame], |row| row.get(0)))
}

/// Largest hit frame strictly before `frame`.
pub fn prev_hit(view: &ViewHandle, frame: i64) -> AnnotationResult<Option<i64>> {
    let sql = format!("SELECT MAX(frame) FROM {} WHERE frame < ?", view.relation());
    view.db()
        .with_conn(|conn| conn.query_row(&sql, params![frame], |row| row.get(0)))
}
