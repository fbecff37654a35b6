//! Review log handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use vreview_models::{VideoId, VideoLog};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Load the review log, or the default document if none is stored.
pub async fn get_log(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoLog>> {
    let video_id = VideoId::parse(video_id)?;
    let logs = state.logs.clone();

    let log = tokio::task::spawn_blocking(move || logs.load(&video_id))
        .await
        .map_err(|e| ApiError::internal(format!("Log load task failed: {}", e)))?;

    Ok(Json(log))
}

/// Save response.
#[derive(Debug, Serialize)]
pub struct SaveLogResponse {
    pub success: bool,
}

/// Replace the stored review log with the posted document.
pub async fn save_log(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    body: Result<Json<VideoLog>, JsonRejection>,
) -> ApiResult<Json<SaveLogResponse>> {
    let video_id = VideoId::parse(video_id)?;
    let Json(log) = body?;
    let logs = state.logs.clone();

    let entries = log.logs.len();
    let (video_id, success) = tokio::task::spawn_blocking(move || {
        let success = logs.save(&video_id, &log);
        (video_id, success)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Log save task failed: {}", e)))?;

    if success {
        info!(video_id = %video_id, entries, "Review log saved");
    }

    Ok(Json(SaveLogResponse { success }))
}
