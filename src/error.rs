//! Unified error types for thumbview
//!
//! Errors stay inside the crate: the dispatcher folds every one of them into
//! a fallback icon, so these types mostly exist for logging and tests.

use std::path::PathBuf;
use std::time::Duration;

/// Unified error type for thumbnail operations
#[derive(Debug, thiserror::Error)]
pub enum ThumbError {
    /// I/O errors (reading sources, writing thumbnails, spawning tools)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag container could not be read or decoded
    #[error("Tag error: {0}")]
    Tags(String),

    /// External tool missing, failed, or produced unusable output
    #[error("Tool error: {0}")]
    Tool(String),

    /// External tool exceeded its time budget and was killed
    #[error("{tool} timed out after {}s", .after.as_secs_f32())]
    Timeout { tool: String, after: Duration },

    /// Optional capability not compiled in
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Thumbnail directory or cache bookkeeping errors
    #[error("Cache error: {path} - {reason}")]
    Cache { path: PathBuf, reason: String },
}

/// Convenience Result type using ThumbError
pub type Result<T> = std::result::Result<T, ThumbError>;

impl ThumbError {
    /// Create a Tags error
    pub fn tags(msg: impl Into<String>) -> Self {
        Self::Tags(msg.into())
    }

    /// Create a Tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Create a Timeout error
    pub fn timeout(tool: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            tool: tool.into(),
            after,
        }
    }

    /// Create an Unsupported error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a Cache error
    pub fn cache(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Cache {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
