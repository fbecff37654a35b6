//! Review log persistence.
//!
//! One JSON document per video at `{log_dir}/{video_id}.json`. Loads never
//! fail at the boundary: any problem yields the default document. Saves
//! replace the whole document and report success as a boolean.
//!
//! Concurrent saves for the same video are not coordinated; the last writer
//! wins. The tool assumes a single reviewer per video.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use metrics::counter;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use vreview_models::{VideoId, VideoLog};

use crate::error::{LogLoadError, StorageError, StorageResult};

/// Counter for failed saves.
pub const LOG_SAVE_FAILURES_TOTAL: &str = "vreview_log_save_failures_total";

/// File-backed store of per-video review logs.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `video_id`.
    pub fn document_path(&self, video_id: &VideoId) -> PathBuf {
        self.dir.join(format!("{}.json", video_id))
    }

    /// Read the stored document, reporting why it could not be read.
    ///
    /// Fields missing from the stored document take their defaults.
    pub fn try_load(&self, video_id: &VideoId) -> Result<VideoLog, LogLoadError> {
        let path = self.document_path(video_id);
        let display = path.display().to_string();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LogLoadError::NotFound(display));
            }
            Err(source) => {
                return Err(LogLoadError::Io {
                    path: display,
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| LogLoadError::Malformed {
            path: display,
            source,
        })
    }

    /// Load the document for `video_id`, falling back to the default.
    pub fn load(&self, video_id: &VideoId) -> VideoLog {
        match self.try_load(video_id) {
            Ok(log) => log,
            Err(e) if e.is_not_found() => {
                debug!(video_id = %video_id, "No review log yet, using default");
                VideoLog::default()
            }
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Failed to load review log, using default");
                VideoLog::default()
            }
        }
    }

    /// Replace the stored document for `video_id`.
    ///
    /// The document is written to a temporary file beside the target and
    /// renamed over it, so readers never observe a partial write.
    pub fn try_save(&self, video_id: &VideoId, log: &VideoLog) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_vec_pretty(log)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;

        let path = self.document_path(video_id);
        tmp.persist(&path)
            .map_err(|e| StorageError::persist(path.display().to_string(), e.error))?;

        debug!(video_id = %video_id, entries = log.logs.len(), "Saved review log");
        Ok(())
    }

    /// Replace the stored document, returning `false` on failure.
    pub fn save(&self, video_id: &VideoId, log: &VideoLog) -> bool {
        match self.try_save(video_id, log) {
            Ok(()) => true,
            Err(e) => {
                counter!(LOG_SAVE_FAILURES_TOTAL).increment(1);
                warn!(video_id = %video_id, error = %e, "Failed to save review log");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vreview_models::LogEntry;

    fn vid(s: &str) -> VideoId {
        VideoId::parse(s).unwrap()
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());

        let log = store.load(&vid("cam"));
        assert_eq!(log, VideoLog::default());
        assert_eq!(
            serde_json::to_value(&log).unwrap(),
            json!({"in": 0, "out": 0, "is_completed": false, "is_in_progress": false, "logs": []})
        );
        assert!(store.try_load(&vid("cam")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_missing_dir_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("not-created"));
        assert_eq!(store.load(&vid("cam")), VideoLog::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());

        let log = VideoLog {
            in_count: 3,
            out_count: 1,
            is_completed: false,
            is_in_progress: true,
            logs: vec![
                LogEntry::new(1.5, "in"),
                LogEntry::new(12.041666666666666, "in"),
                LogEntry::new(30.0, "out"),
            ],
            ..Default::default()
        };

        assert!(store.save(&vid("cam"), &log));
        assert_eq!(store.load(&vid("cam")), log);
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());

        let mut first = VideoLog::default();
        first.in_count = 9;
        first.extra.insert("reviewer".to_string(), json!("kim"));
        first.logs.push(LogEntry::new(2.0, "in"));
        assert!(store.save(&vid("cam"), &first));

        let second = VideoLog {
            out_count: 2,
            ..Default::default()
        };
        assert!(store.save(&vid("cam"), &second));

        let loaded = store.load(&vid("cam"));
        assert_eq!(loaded, second);
        assert!(loaded.extra.is_empty());
        assert!(loaded.logs.is_empty());
    }

    #[test]
    fn test_partial_document_merges_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());
        fs::write(store.document_path(&vid("cam")), r#"{"in": 5, "is_completed": true}"#).unwrap();

        let log = store.load(&vid("cam"));
        assert_eq!(log.in_count, 5);
        assert_eq!(log.out_count, 0);
        assert!(log.is_completed);
        assert!(!log.is_in_progress);
        assert!(log.logs.is_empty());
    }

    #[test]
    fn test_malformed_document_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());
        fs::write(store.document_path(&vid("cam")), "{not json").unwrap();

        assert!(matches!(
            store.try_load(&vid("cam")),
            Err(LogLoadError::Malformed { .. })
        ));
        assert_eq!(store.load(&vid("cam")), VideoLog::default());
    }

    #[test]
    fn test_unreadable_document_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());
        // A directory where the document should be
        fs::create_dir(store.document_path(&vid("cam"))).unwrap();

        let err = store.try_load(&vid("cam")).unwrap_err();
        assert!(matches!(err, LogLoadError::Io { .. }));
        assert!(!err.is_not_found());
        assert_eq!(store.load(&vid("cam")), VideoLog::default());
    }

    #[test]
    fn test_wrong_type_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());
        fs::write(store.document_path(&vid("cam")), r#"{"in": "three"}"#).unwrap();

        assert_eq!(store.load(&vid("cam")), VideoLog::default());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("nested").join("logs"));

        assert!(store.save(&vid("cam"), &VideoLog::default()));
        assert!(store.document_path(&vid("cam")).exists());
    }

    #[test]
    fn test_save_failure_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log directory should be
        let blocker = dir.path().join("logs");
        fs::write(&blocker, b"").unwrap();
        let store = LogStore::new(&blocker);

        assert!(!store.save(&vid("cam"), &VideoLog::default()));
    }

    #[test]
    fn test_saved_document_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path());
        let log = VideoLog {
            in_count: 1,
            logs: vec![LogEntry::new(0.5, "in")],
            ..Default::default()
        };
        assert!(store.save(&vid("cam"), &log));

        let raw = fs::read_to_string(store.document_path(&vid("cam"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!({
                "in": 1,
                "out": 0,
                "is_completed": false,
                "is_in_progress": false,
                "logs": [{"rawTime": 0.5, "type": "in"}]
            })
        );
    }
}
