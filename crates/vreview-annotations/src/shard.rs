//! Shard discovery.
//!
//! A shard is a `*.parquet` file directly inside the boxes directory. Each
//! shard stem belongs to exactly one video:
//!
//! - `cam01.parquet` is the single shard of `cam01`
//! - `cam01_0003_0120.parquet` is a part of `cam01` (the trailing two
//!   underscore-separated numeric segments are stripped)
//!
//! A stem whose last two segments are numeric also matches the video named
//! exactly after it, so `cctv_20240501_1200.parquet` backs both
//! `cctv_20240501_1200` and, as a part, `cctv`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use vreview_models::VideoId;

use crate::error::{AnnotationError, AnnotationResult};

/// File extension for detection shards.
pub const SHARD_EXTENSION: &str = "parquet";

/// The shard files backing one video, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSet {
    pub video_id: VideoId,
    pub paths: Vec<PathBuf>,
}

impl ShardSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Video identifier that owns the shard with the given file stem as a part.
pub fn shard_owner(stem: &str) -> &str {
    let mut parts = stem.rsplitn(3, '_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(last), Some(second), Some(rest))
            if is_digits(last) && is_digits(second) && !rest.is_empty() =>
        {
            rest
        }
        _ => stem,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Collect every shard in `dir` owned by `video_id`.
///
/// Fails with `NotFound` when the directory is missing or no shard matches.
pub fn discover_shards(dir: &Path, video_id: &VideoId) -> AnnotationResult<ShardSet> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AnnotationError::not_found(
                video_id.as_str(),
                dir.display().to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !is_shard_file(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !shard_matches(stem, video_id) {
            continue;
        }
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(AnnotationError::not_found(
            video_id.as_str(),
            dir.display().to_string(),
        ));
    }

    paths.sort();
    debug!(video_id = %video_id, shards = paths.len(), "Resolved detection shards");

    Ok(ShardSet {
        video_id: video_id.clone(),
        paths,
    })
}

/// Whether the shard with `stem` belongs to `video_id`, exactly or as a part.
fn shard_matches(stem: &str, video_id: &VideoId) -> bool {
    stem == video_id.as_str() || shard_owner(stem) == video_id.as_str()
}

fn is_shard_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(SHARD_EXTENSION))
}
