//! Video catalog listing.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use vreview_models::{VideoEntry, VideoId};

use crate::error::StorageResult;
use crate::log_store::LogStore;

/// Extension of playable media files.
pub const MEDIA_EXTENSION: &str = "mp4";

/// The set of reviewable videos on disk.
#[derive(Debug, Clone)]
pub struct VideoCatalog {
    videos_dir: PathBuf,
    /// URL prefix the media directory is served under
    url_prefix: String,
    fps: f64,
}

impl VideoCatalog {
    pub fn new(videos_dir: impl Into<PathBuf>, url_prefix: impl Into<String>, fps: f64) -> Self {
        Self {
            videos_dir: videos_dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            fps,
        }
    }

    pub fn videos_dir(&self) -> &Path {
        &self.videos_dir
    }

    /// List every media file, sorted by file name, with its review status.
    ///
    /// A missing videos directory yields an empty list.
    pub fn list(&self, logs: &LogStore) -> StorageResult<Vec<VideoEntry>> {
        let entries = match fs::read_dir(&self.videos_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.videos_dir.display(), "Videos directory missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !is_media_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }
        files.sort();

        let mut out = Vec::with_capacity(files.len());
        for file in files {
            let video_id = match VideoId::from_media_file_name(&file) {
                Ok(id) => id,
                Err(e) => {
                    warn!(file = %file, error = %e, "Skipping media file with unusable name");
                    continue;
                }
            };

            let log = logs.load(&video_id);
            out.push(VideoEntry {
                url: format!("{}/{}", self.url_prefix, file),
                file,
                fps: self.fps,
                status: log.status(),
                in_count: log.in_count,
                out_count: log.out_count,
                video_id,
            });
        }

        Ok(out)
    }
}

fn is_media_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(MEDIA_EXTENSION))
}
