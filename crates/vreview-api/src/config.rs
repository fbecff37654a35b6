//! API configuration.

use std::path::PathBuf;

use vreview_models::DEFAULT_FPS;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Directory of playable `*.mp4` files
    pub videos_dir: PathBuf,
    /// Directory of `*.parquet` detection shards
    pub boxes_dir: PathBuf,
    /// Directory of review log documents
    pub log_dir: PathBuf,
    /// Frame rate shared by every video
    pub fps: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

impl ApiConfig {
    /// Defaults with every data directory under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 2 * 1024 * 1024, // 2MB
            environment: "development".to_string(),
            videos_dir: data_dir.join("videos"),
            boxes_dir: data_dir.join("boxes"),
            log_dir: data_dir.join("logs"),
            fps: DEFAULT_FPS,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let defaults = Self::with_data_dir(&data_dir);

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            videos_dir: std::env::var("VIDEOS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.videos_dir),
            boxes_dir: std::env::var("BOXES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.boxes_dir),
            log_dir: std::env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            fps: std::env::var("VIDEO_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|fps: &f64| fps.is_finite() && *fps > 0.0)
                .unwrap_or(defaults.fps),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
