//! Entry snapshots handed over by the file browser

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Immutable snapshot of a file or directory, taken per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path
    pub path: PathBuf,
    /// Base name
    pub name: String,
    pub is_dir: bool,
    /// Number of entries in the containing directory (the entry included)
    pub sibling_count: usize,
    /// Human readable size, e.g. "1.5 MB"
    pub size_hint: String,
}

impl Entry {
    /// Build an entry from values the caller already has
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, sibling_count: usize) -> Self {
        let path = path.into();
        let name = base_name(&path);
        Self {
            path,
            name,
            is_dir,
            sibling_count,
            size_hint: String::new(),
        }
    }

    /// Stat `path` and count its siblings.
    ///
    /// This blocks on the filesystem and is meant to run on the caller's
    /// thread before a job is submitted.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let metadata = fs::metadata(&path)?;
        let sibling_count = path.parent().map(count_entries).unwrap_or(0);

        Ok(Self {
            name: base_name(&path),
            is_dir: metadata.is_dir(),
            sibling_count,
            size_hint: if metadata.is_dir() {
                String::new()
            } else {
                format_size(metadata.len())
            },
            path,
        })
    }

    /// Set the size hint (builder style)
    pub fn with_size_hint(mut self, size_hint: impl Into<String>) -> Self {
        self.size_hint = size_hint.into();
        self
    }

    /// Caption shown under a thumbnail: size plus upper-cased extension
    pub fn label(&self) -> String {
        let lower = self.name.to_lowercase();
        let ext = if lower.ends_with(".tar.gz") {
            "TAR.GZ".to_string()
        } else if lower.ends_with(".tar.bz2") {
            "TAR.BZ2".to_string()
        } else {
            Path::new(&self.name)
                .extension()
                .map(|e| e.to_string_lossy().to_uppercase())
                .unwrap_or_default()
        };

        match (self.size_hint.is_empty(), ext.is_empty()) {
            (_, true) => self.size_hint.clone(),
            (true, false) => ext,
            (false, false) => format!("{} - {}", self.size_hint, ext),
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Count directory entries, treating an unreadable directory as empty
fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

/// Format a byte count as a human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
