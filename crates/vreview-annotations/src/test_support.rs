//! Parquet fixtures for unit tests, written through DuckDB itself.

use std::path::{Path, PathBuf};

use duckdb::Connection;

use crate::db::sql_string_literal;

/// One detection row as stored in a shard.
#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub frame: i64,
    pub box_index: i64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Row {
    /// Row with coordinates derived from its keys.
    pub fn new(frame: i64, box_index: i64) -> Self {
        Self {
            frame,
            box_index,
            x: frame as f64 + 0.5,
            y: box_index as f64 + 0.25,
            width: 10.0,
            height: 20.0,
        }
    }

    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }
}

/// Write `rows` to `{dir}/{stem}.parquet` and return the path.
///
/// `frame` and `box_index` are stored as 32-bit integers, the way upstream
/// detectors emit them.
pub fn write_shard(dir: &Path, stem: &str, rows: &[Row]) -> PathBuf {
    let path = dir.join(format!("{}.parquet", stem));
    let target = sql_string_literal(path.to_str().expect("utf-8 temp path"));

    let select = if rows.is_empty() {
        "SELECT CAST(0 AS INTEGER) AS frame, CAST(0 AS INTEGER) AS box_index, \
         CAST(0 AS DOUBLE) AS x, CAST(0 AS DOUBLE) AS y, \
         CAST(0 AS DOUBLE) AS width, CAST(0 AS DOUBLE) AS height WHERE false"
            .to_string()
    } else {
        let values: Vec<String> = rows
            .iter()
            .map(|r| {
                format!(
                    "(CAST({} AS INTEGER), CAST({} AS INTEGER), CAST({:?} AS DOUBLE), \
                     CAST({:?} AS DOUBLE), CAST({:?} AS DOUBLE), CAST({:?} AS DOUBLE))",
                    r.frame, r.box_index, r.x, r.y, r.width, r.height
                )
            })
            .collect();
        format!(
            "SELECT * FROM (VALUES {}) AS t(frame, box_index, x, y, width, height)",
            values.join(", ")
        )
    };

    let conn = Connection::open_in_memory().expect("open fixture db");
    conn.execute_batch(&format!("COPY ({}) TO {} (FORMAT PARQUET);", select, target))
        .expect("write parquet fixture");
    path
}
