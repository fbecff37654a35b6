//! API routes.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::handlers::{
    get_boxes, get_boxes_range, get_log, get_next_hit, get_prev_hit, get_timeline, health,
    list_videos, ready, save_log,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, redact_internal_errors, request_id, request_logging, security_headers,
};
use crate::state::{AppState, MEDIA_URL_PREFIX};

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let video_routes = Router::new()
        .route("/videos", get(list_videos))
        // Detection queries
        .route("/videos/:video_id/boxes", get(get_boxes))
        .route("/videos/:video_id/boxes_range", get(get_boxes_range))
        .route("/videos/:video_id/timeline", get(get_timeline))
        .route("/videos/:video_id/next_hit", get(get_next_hit))
        .route("/videos/:video_id/prev_hit", get(get_prev_hit))
        // Review log
        .route("/videos/:video_id/log", get(get_log).post(save_log));

    // Media files with byte-range support
    let media = ServeDir::new(&state.config.videos_dir);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", video_routes)
        .nest_service(MEDIA_URL_PREFIX, media)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn_with_state(state.clone(), redact_internal_errors))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
