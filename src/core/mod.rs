//! Core module - Entries, classification and gating
//!
//! Everything here is cheap and side-effect free apart from
//! [`Entry::from_path`], which stats the entry and counts its siblings.

pub mod entry;
pub mod gate;
pub mod mime;
pub mod settings;
pub mod thumbnail;

pub use entry::{format_size, Entry};
pub use gate::should_gate;
pub use mime::{classify, extension_for_mime, is_passthrough_image, FLAC_MIMES, MP3_MIME};
pub use settings::ThumbnailConfig;
pub use thumbnail::{FallbackIcon, Thumbnail};
