//! Runtime thumbnail settings

use std::path::PathBuf;
use std::time::Duration;

/// Default edge length of a thumbnail, in pixels
pub const DEFAULT_SIZE: u32 = 64;

/// Default time budget for one external tool invocation
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings the thumbnailer is constructed with
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailConfig {
    /// Edge length thumbnails are scaled to when compositing an overlay
    pub size: u32,
    /// Sibling-count threshold, see [`crate::core::should_gate`]
    pub threshold: i64,
    /// Where generated thumbnails go (None = fresh temp directory)
    pub thumb_dir: Option<PathBuf>,
    /// Image composited over video frames, e.g. a play button
    pub play_overlay: Option<PathBuf>,
    /// Kill an external tool that runs longer than this
    pub tool_timeout: Duration,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            threshold: -1,
            thumb_dir: None,
            play_overlay: None,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }
}

impl ThumbnailConfig {
    /// Overlay path, only if it is set and exists on disk
    pub fn usable_overlay(&self) -> Option<&PathBuf> {
        self.play_overlay.as_ref().filter(|p| p.is_file())
    }
}
