//! Video catalog handlers.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use vreview_models::VideoEntry;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List every reviewable video with its review status.
pub async fn list_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<VideoEntry>>> {
    let catalog = state.catalog.clone();
    let logs = state.logs.clone();

    let videos = tokio::task::spawn_blocking(move || catalog.list(&logs))
        .await
        .map_err(|e| ApiError::internal(format!("Catalog task failed: {}", e)))??;

    debug!(count = videos.len(), "Listed videos");
    Ok(Json(videos))
}
