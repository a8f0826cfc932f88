//! Extraction strategies and their dispatcher
//!
//! Each strategy reports an [`Outcome`]; the [`Dispatcher`] turns outcomes
//! into a [`crate::core::Thumbnail`], storing generated bytes in the cache.

pub mod art;
pub mod dispatch;
pub mod tools;
pub mod video;

use std::fmt;
use std::path::PathBuf;

pub use art::{pick_picture, AudioContainer, EmbeddedPicture};
pub use dispatch::Dispatcher;
pub use tools::{find_binary, stack_images, stack_images_with, FrameExtractor};
pub use video::compute_size;

/// Why an entry ended up with a fallback icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Directory,
    Gated,
    UnknownType,
    CapabilityUnavailable,
    NoEmbeddedArt,
    TagError(String),
    ToolMissing,
    ToolFailed(String),
    EmptyOutput,
    TimedOut,
    CacheWrite(String),
    /// Cache emptied between the lookup check and the read
    CacheCleared,
    Panicked,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Directory => write!(f, "directory"),
            FallbackReason::Gated => write!(f, "directory too large"),
            FallbackReason::UnknownType => write!(f, "unsupported type"),
            FallbackReason::CapabilityUnavailable => write!(f, "tag reading unavailable"),
            FallbackReason::NoEmbeddedArt => write!(f, "no embedded art"),
            FallbackReason::TagError(e) => write!(f, "tag error: {}", e),
            FallbackReason::ToolMissing => write!(f, "no frame extractor"),
            FallbackReason::ToolFailed(e) => write!(f, "extractor failed: {}", e),
            FallbackReason::EmptyOutput => write!(f, "extractor produced no image"),
            FallbackReason::TimedOut => write!(f, "extraction timed out"),
            FallbackReason::CacheWrite(e) => write!(f, "cache write failed: {}", e),
            FallbackReason::CacheCleared => write!(f, "cache cleared during lookup"),
            FallbackReason::Panicked => write!(f, "strategy panicked"),
        }
    }
}

/// What a single strategy produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Image bytes to be written to the cache under `extension`
    Bytes { data: Vec<u8>, extension: String },
    /// An existing file to show as-is
    Passthrough(PathBuf),
    /// Nothing to show; use a fallback icon
    Fallback(FallbackReason),
}
