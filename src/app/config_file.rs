//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/thumbview/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::settings::{DEFAULT_SIZE, DEFAULT_TOOL_TIMEOUT};
use crate::core::ThumbnailConfig;

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Thumbnail generation settings
    pub thumbnails: ThumbnailsSection,
    /// Video frame extraction settings
    pub video: VideoSection,
    /// Diagnostic logging
    pub logging: LoggingSection,
}

/// Thumbnail generation settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThumbnailsSection {
    /// Thumbnail edge length in pixels
    pub size: u32,
    /// Skip thumbnails in directories with more entries than this.
    /// 0 disables thumbnails, a negative value never skips.
    pub threshold: i64,
    /// Directory for generated thumbnails (default: fresh temp directory)
    pub dir: Option<PathBuf>,
}

impl Default for ThumbnailsSection {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            threshold: -1,
            dir: None,
        }
    }
}

/// Video frame extraction settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VideoSection {
    /// Image placed over video frames, e.g. a play button
    pub play_overlay: Option<PathBuf>,
    /// Seconds an extractor may run before it is killed
    pub timeout_secs: u64,
}

impl Default for VideoSection {
    fn default() -> Self {
        Self {
            play_overlay: None,
            timeout_secs: DEFAULT_TOOL_TIMEOUT.as_secs(),
        }
    }
}

/// Diagnostic logging
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/thumbview)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("thumbview"))
    }

    /// Get the config file path (~/.config/thumbview/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Runtime thumbnail settings described by this file
    pub fn thumbnail_config(&self) -> ThumbnailConfig {
        ThumbnailConfig {
            size: self.thumbnails.size,
            threshold: self.thumbnails.threshold,
            thumb_dir: self.thumbnails.dir.clone(),
            play_overlay: self.video.play_overlay.clone(),
            tool_timeout: Duration::from_secs(self.video.timeout_secs),
        }
    }
}
