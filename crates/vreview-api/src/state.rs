//! Application state.

use std::sync::Arc;

use vreview_annotations::{AnnotationConfig, AnnotationResult, ViewCache};
use vreview_storage::{LogStore, VideoCatalog};

use crate::config::ApiConfig;

/// URL prefix the media directory is served under.
pub const MEDIA_URL_PREFIX: &str = "/videos";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub views: Arc<ViewCache>,
    pub logs: Arc<LogStore>,
    pub catalog: Arc<VideoCatalog>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> AnnotationResult<Self> {
        let views = ViewCache::new(AnnotationConfig::new(&config.boxes_dir).with_fps(config.fps))?;
        let logs = LogStore::new(&config.log_dir);
        let catalog = VideoCatalog::new(&config.videos_dir, MEDIA_URL_PREFIX, config.fps);

        Ok(Self {
            config,
            views: Arc::new(views),
            logs: Arc::new(logs),
            catalog: Arc::new(catalog),
        })
    }
}
