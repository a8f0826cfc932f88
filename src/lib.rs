//! thumbview - Background thumbnail generation for file browsers
//!
//! Given an entry of a directory listing, decide what to show for it: the
//! picture itself, embedded cover art, a frame grabbed from a video, or a
//! fallback icon. Slow work runs on a single background worker and results
//! are cached for the session.

pub mod app;
pub mod cache;
pub mod core;
pub mod error;
pub mod extract;
pub mod queue;

pub use crate::core::{Entry, FallbackIcon, Thumbnail, ThumbnailConfig};
pub use error::{Result, ThumbError};
pub use queue::{JobHandle, JobState, Submission, Thumbnailer};
