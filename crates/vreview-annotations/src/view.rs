//! Per-video view cache.
//!
//! `ViewCache::ensure` resolves a video's shards and registers one DuckDB
//! view over all of them the first time the video is referenced. Views are
//! kept for the lifetime of the cache and are never refreshed, so shard
//! files changed after registration are not picked up.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use vreview_models::{VideoId, DEFAULT_FPS};

use crate::db::{sql_path_list, AnnotationDb};
use crate::error::{AnnotationError, AnnotationResult};
use crate::metrics;
use crate::shard::{discover_shards, ShardSet};

/// Where shards live and how frames map to seconds.
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Directory holding `*.parquet` detection shards
    pub boxes_dir: PathBuf,
    /// Frame rate shared by every video
    pub fps: f64,
}

impl AnnotationConfig {
    pub fn new(boxes_dir: impl Into<PathBuf>) -> Self {
        Self {
            boxes_dir: boxes_dir.into(),
            fps: DEFAULT_FPS,
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }
}

/// Name of a registered view.
///
/// Generated from a sequence number, never from user input, so it is always
/// a valid bare SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationName(String);

impl RelationName {
    fn from_sequence(n: u64) -> Self {
        Self(format!("annotations_{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered view over one video's detection shards.
#[derive(Debug)]
pub struct ViewHandle {
    video_id: VideoId,
    relation: RelationName,
    shards: Vec<PathBuf>,
    fps: f64,
    db: Arc<AnnotationDb>,
}

impl ViewHandle {
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn relation(&self) -> &RelationName {
        &self.relation
    }

    /// Shard files the view spans.
    pub fn shards(&self) -> &[PathBuf] {
        &self.shards
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub(crate) fn db(&self) -> &AnnotationDb {
        &self.db
    }
}

/// Process-wide cache of registered views, keyed by video.
pub struct ViewCache {
    config: AnnotationConfig,
    db: Arc<AnnotationDb>,
    views: RwLock<HashMap<VideoId, Arc<ViewHandle>>>,
    next_relation: AtomicU64,
}

impl ViewCache {
    /// Create a cache backed by a fresh in-memory database.
    pub fn new(config: AnnotationConfig) -> AnnotationResult<Self> {
        let db = AnnotationDb::open_in_memory()?;
        Ok(Self::with_db(config, Arc::new(db)))
    }

    /// Create a cache that registers views in an existing database.
    pub fn with_db(config: AnnotationConfig, db: Arc<AnnotationDb>) -> Self {
        Self {
            config,
            db,
            views: RwLock::new(HashMap::new()),
            next_relation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    pub fn boxes_dir(&self) -> &Path {
        &self.config.boxes_dir
    }

    /// Return the view for `video_id`, registering it on first use.
    pub fn ensure(&self, video_id: &VideoId) -> AnnotationResult<Arc<ViewHandle>> {
        // Fast path: read lock only
        {
            let views = self
                .views
                .read()
                .map_err(|e| AnnotationError::lock_poisoned(e.to_string()))?;
            if let Some(view) = views.get(video_id) {
                metrics::record_cache_lookup(true);
                return Ok(Arc::clone(view));
            }
        }

        metrics::record_cache_lookup(false);

        // Resolve shards before locking so unknown videos never block readers
        let shards = discover_shards(&self.config.boxes_dir, video_id)?;

        let mut views = self
            .views
            .write()
            .map_err(|e| AnnotationError::lock_poisoned(e.to_string()))?;

        // Another caller may have registered it while we scanned
        if let Some(view) = views.get(video_id) {
            debug!(video_id = %video_id, "View registered concurrently");
            return Ok(Arc::clone(view));
        }

        let view = Arc::new(self.register(video_id, shards)?);
        views.insert(video_id.clone(), Arc::clone(&view));
        Ok(view)
    }

    /// Convenience wrapper validating a raw identifier first.
    pub fn ensure_str(&self, video_id: &str) -> AnnotationResult<Arc<ViewHandle>> {
        let video_id = VideoId::parse(video_id)?;
        self.ensure(&video_id)
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn register(&self, video_id: &VideoId, shards: ShardSet) -> AnnotationResult<ViewHandle> {

        let file_list = sql_path_list(&shards.paths).ok_or_else(|| {
            AnnotationError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("shard path for {} is not valid UTF-8", video_id),
            ))
        })?;

        let relation =
            RelationName::from_sequence(self.next_relation.fetch_add(1, Ordering::Relaxed));

        let sql = format!(
            r#"
            CREATE VIEW {relation} AS
            SELECT
                CAST(frame AS BIGINT) AS frame,
                CAST(box_index AS BIGINT) AS box_index,
                CAST(x AS DOUBLE) AS x,
                CAST(y AS DOUBLE) AS y,
                CAST(width AS DOUBLE) AS width,
                CAST(height AS DOUBLE) AS height
            FROM read_parquet({file_list}, union_by_name = true);
            "#
        );

        self.db.with_conn(|conn| conn.execute_batch(&sql))?;

        metrics::record_view_created(shards.len());
        info!(
            video_id = %video_id,
            relation = %relation,
            shards = shards.len(),
            "Registered detection view"
        );

        Ok(ViewHandle {
            video_id: video_id.clone(),
            relation,
            shards: shards.paths,
            fps: self.config.fps,
            db: Arc::clone(&self.db),
        })
    }
}

impl fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCache")
            .field("config", &self.config)
            .field("views", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_shard, Row};
    use std::thread;

    fn vid(s: &str) -> VideoId {
        VideoId::parse(s).unwrap()
    }

    #[test]
    fn test_ensure_returns_cached_handle() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam", &[Row::new(0, 0)]);

        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();
        let first = cache.ensure(&vid("cam")).unwrap();
        let second = cache.ensure(&vid("cam")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ensure_unknown_video_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();

        let err = cache.ensure(&vid("ghost")).unwrap_err();
        assert!(err.is_not_found());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_video_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();

        assert!(cache.ensure(&vid("late")).unwrap_err().is_not_found());
        assert!(cache.ensure(&vid("late")).unwrap_err().is_not_found());
        assert!(cache.is_empty());

        // No negative entry: shards that appear later resolve
        write_shard(dir.path(), "late", &[Row::new(3, 0)]);
        let view = cache.ensure(&vid("late")).unwrap();
        assert_eq!(view.relation().as_str(), "annotations_0");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_not_found_lookup_while_reader_holds_view() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam", &[Row::new(0, 0)]);
        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();
        cache.ensure(&vid("cam")).unwrap();

        // A read guard is held while a miss for another id fails
        let guard = cache.views.read().unwrap();
        assert!(cache.ensure(&vid("ghost")).unwrap_err().is_not_found());
        drop(guard);
    }

    #[test]
    fn test_ensure_str_rejects_invalid_id() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();

        let err = cache.ensure_str("../boxes").unwrap_err();
        assert!(matches!(err, AnnotationError::InvalidVideoId(_)));
    }

    #[test]
    fn test_relation_names_do_not_embed_video_id() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam-01.v2", &[Row::new(0, 0)]);

        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();
        let view = cache.ensure(&vid("cam-01.v2")).unwrap();

        assert_eq!(view.relation().as_str(), "annotations_0");
        assert_eq!(view.shards().len(), 1);
    }

    #[test]
    fn test_view_spans_all_part_shards() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam_000_000", &[Row::new(1, 0), Row::new(2, 0)]);
        write_shard(dir.path(), "cam_000_001", &[Row::new(3, 0)]);

        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();
        let view = cache.ensure(&vid("cam")).unwrap();

        assert_eq!(view.shards().len(), 2);
        assert_eq!(crate::detection_count(&view).unwrap(), 3);
    }

    #[test]
    fn test_concurrent_first_access_registers_once() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam", &[Row::new(0, 0)]);

        let cache = Arc::new(ViewCache::new(AnnotationConfig::new(dir.path())).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.ensure(&vid("cam")).unwrap())
            })
            .collect();

        let views: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for view in &views[1..] {
            assert!(Arc::ptr_eq(&views[0], view));
        }
        assert_eq!(views[0].relation().as_str(), "annotations_0");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_views_are_not_refreshed() {
        let dir = tempfile::tempdir().unwrap();
        write_shard(dir.path(), "cam", &[Row::new(0, 0)]);

        let cache = ViewCache::new(AnnotationConfig::new(dir.path())).unwrap();
        let view = cache.ensure(&vid("cam")).unwrap();

        // A shard added later is not part of the already-registered view
        write_shard(dir.path(), "cam_000_001", &[Row::new(5, 0)]);
        let again = cache.ensure(&vid("cam")).unwrap();
        assert!(Arc::ptr_eq(&view, &again));
        assert_eq!(again.shards().len(), 1);
    }
}
