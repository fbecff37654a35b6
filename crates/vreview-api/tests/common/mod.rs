//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use duckdb::Connection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vreview_annotations::db::sql_string_literal;
use vreview_api::{create_router, ApiConfig, AppState};

/// A data directory with `videos/`, `boxes/` and `logs/` and a router over it.
pub struct TestApp {
    pub dir: TempDir,
    pub config: ApiConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::in_dir(tempfile::tempdir().unwrap())
    }

    /// Data directory whose path starts with `prefix`.
    pub fn with_dir_prefix(prefix: &str) -> Self {
        Self::in_dir(tempfile::Builder::new().prefix(prefix).tempdir().unwrap())
    }

    fn in_dir(dir: TempDir) -> Self {
        let config = ApiConfig::with_data_dir(dir.path());
        fs::create_dir_all(&config.videos_dir).unwrap();
        fs::create_dir_all(&config.boxes_dir).unwrap();
        Self { dir, config }
    }

    pub fn router(&self) -> Router {
        let state = AppState::new(self.config.clone()).unwrap();
        create_router(state, None)
    }

    pub fn add_video(&self, file: &str, bytes: &[u8]) {
        fs::write(self.config.videos_dir.join(file), bytes).unwrap();
    }

    /// Write a shard of `(frame, box_index)` rows.
    pub fn add_shard(&self, stem: &str, rows: &[(i64, i64)]) {
        write_shard(&self.config.boxes_dir, stem, rows);
    }
}

/// Write `(frame, box_index)` rows to `{dir}/{stem}.parquet` with fixed geometry.
pub fn write_shard(dir: &Path, stem: &str, rows: &[(i64, i64)]) {
    let path = dir.join(format!("{}.parquet", stem));
    let values: Vec<String> = rows
        .iter()
        .map(|(frame, idx)| {
            format!(
                "(CAST({} AS INTEGER), CAST({} AS INTEGER), 1.5, 2.5, 30.0, 40.0)",
                frame, idx
            )
        })
        .collect();
    let sql = format!(
        "COPY (SELECT * FROM (VALUES {}) AS t(frame, box_index, x, y, width, height)) \
         TO {} (FORMAT PARQUET);",
        values.join(", "),
        sql_string_literal(&path.to_string_lossy())
    );
    Connection::open_in_memory().unwrap().execute_batch(&sql).unwrap();
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
