//! Detection query handlers.
//!
//! Every query resolves the video's cached view and runs on the blocking
//! pool, since the query engine is synchronous.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use vreview_annotations::{
    boxes_at, boxes_in_range, histogram, next_hit, prev_hit, AnnotationResult, ViewHandle,
};
use vreview_models::{DetectionBox, FrameBoxes, TimelineHistogram, MAX_BIN_SEC, MIN_BIN_SEC};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Resolve the view for `video_id` and run `query` against it off the async runtime.
async fn query_view<T, F>(state: &AppState, video_id: String, query: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ViewHandle) -> AnnotationResult<T> + Send + 'static,
{
    let views = state.views.clone();
    let result = tokio::task::spawn_blocking(move || {
        let view = views.ensure_str(&video_id)?;
        query(&view)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Query task failed: {}", e)))?;

    Ok(result?)
}

/// Extract and validate query parameters.
fn validated<T: Validate>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    let Query(params) = query?;
    params.validate()?;
    Ok(params)
}

/// Single-frame query params.
#[derive(Debug, Deserialize, Validate)]
pub struct FrameQuery {
    #[validate(range(min = 0))]
    pub frame: i64,
}

/// Boxes on one frame.
pub async fn get_boxes(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    query: Result<Query<FrameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<DetectionBox>>> {
    let FrameQuery { frame } = validated(query)?;
    let boxes = query_view(&state, video_id, move |view| boxes_at(view, frame)).await?;
    Ok(Json(boxes))
}

/// Frame range query params.
#[derive(Debug, Deserialize, Validate)]
pub struct RangeQuery {
    #[validate(range(min = 0))]
    pub start_frame: i64,
    #[validate(range(min = 0))]
    pub end_frame: i64,
}

/// Range response. Bounds echo the request as given.
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub boxes: FrameBoxes,
    pub start_frame: i64,
    pub end_frame: i64,
}

/// Boxes on every frame of an inclusive range.
pub async fn get_boxes_range(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<RangeResponse>> {
    let RangeQuery {
        start_frame,
        end_frame,
    } = validated(query)?;

    let boxes = query_view(&state, video_id, move |view| {
        boxes_in_range(view, start_frame, end_frame)
    })
    .await?;

    Ok(Json(RangeResponse {
        boxes,
        start_frame,
        end_frame,
    }))
}

fn default_bin_sec() -> u32 {
    MIN_BIN_SEC
}

/// Timeline query params.
#[derive(Debug, Deserialize, Validate)]
pub struct TimelineQuery {
    #[serde(default = "default_bin_sec")]
    #[validate(range(min = MIN_BIN_SEC, max = MAX_BIN_SEC))]
    pub bin_sec: u32,
}

/// Timeline response.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub bin_sec: u32,
    pub counts: TimelineHistogram,
}

/// Detection counts per time bin.
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    query: Result<Query<TimelineQuery>, QueryRejection>,
) -> ApiResult<Json<TimelineResponse>> {
    let TimelineQuery { bin_sec } = validated(query)?;
    let counts = query_view(&state, video_id, move |view| histogram(view, bin_sec)).await?;
    Ok(Json(TimelineResponse { bin_sec, counts }))
}

/// Hit search response. `frame` is null when there is no hit in that direction.
#[derive(Debug, Serialize)]
pub struct HitResponse {
    pub frame: Option<i64>,
}

/// Nearest frame with detections after `frame`.
pub async fn get_next_hit(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    query: Result<Query<FrameQuery>, QueryRejection>,
) -> ApiResult<Json<HitResponse>> {
    let FrameQuery { frame } = validated(query)?;
    let hit = query_view(&state, video_id, move |view| next_hit(view, frame)).await?;
    Ok(Json(HitResponse { frame: hit }))
}

/// Nearest frame with detections before `frame`.
pub async fn get_prev_hit(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    query: Result<Query<FrameQuery>, QueryRejection>,
) -> ApiResult<Json<HitResponse>> {
    let FrameQuery { frame } = validated(query)?;
    let hit = query_view(&state, video_id, move |view| prev_hit(view, frame)).await?;
    Ok(Json(HitResponse { frame: hit }))
}
