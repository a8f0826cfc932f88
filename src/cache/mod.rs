//! Thumbnail cache and temp-file writer
//!
//! Generated thumbnails are written to uniquely named files under one
//! directory, and the source path -> thumbnail path mapping is kept in memory
//! for the rest of the session. Nothing is evicted; the whole directory goes
//! away on [`ThumbnailCache::clear`].

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::{Result, ThumbError};

/// Prefix of every generated thumbnail file
const FILE_PREFIX: &str = "thumb-";

pub struct ThumbnailCache {
    dir: PathBuf,
    entries: RwLock<HashMap<PathBuf, PathBuf>>,
}

impl ThumbnailCache {
    /// Use `dir` for thumbnails, creating it if absent.
    ///
    /// With no directory a fresh temporary one is created. It is not removed
    /// on drop; call [`ThumbnailCache::clear`] when the application stops.
    pub fn new(dir: Option<&Path>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                dir.to_path_buf()
            }
            None => tempfile::Builder::new()
                .prefix("thumbview-")
                .suffix("-thumbs")
                .tempdir()?
                .keep(),
        };
        debug!(dir = %dir.display(), "thumbnail directory ready");

        Ok(Self {
            dir,
            entries: RwLock::new(HashMap::new()),
        })
    }

    /// Directory generated thumbnails are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Previously generated thumbnail for `source`
    pub fn get(&self, source: &Path) -> Option<PathBuf> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned()
    }

    pub fn contains(&self, source: &Path) -> bool {
        self.get(source).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `bytes` to a new file with `extension` and remember it for `source`.
    ///
    /// The mapping is only recorded once the file is fully written.
    pub fn store(&self, source: &Path, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        // clear() may have removed the directory earlier in the session
        fs::create_dir_all(&self.dir)?;

        let suffix = format!(".{}", extension.trim_start_matches('.'));
        let mut file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let (_, path) = file
            .keep()
            .map_err(|e| ThumbError::cache(&self.dir, e.error.to_string()))?;

        debug!(
            source = %source.display(),
            thumb = %path.display(),
            bytes = bytes.len(),
            "stored thumbnail"
        );
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_path_buf(), path.clone());
        Ok(path)
    }

    /// Remove the thumbnail directory and forget every mapping.
    ///
    /// Errors are logged and otherwise ignored.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => debug!(dir = %self.dir.display(), "thumbnail directory removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(dir = %self.dir.display(), "failed to remove thumbnails: {}", e),
        }
    }
}
