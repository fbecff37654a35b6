//! Axum HTTP API for the detection review tool.
//!
//! This crate provides:
//! - Video listing and static media serving
//! - Box, range, timeline and hit queries over cached detection views
//! - Review log load/save
//! - Health, readiness and Prometheus metrics endpoints

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
