//! What a resolved entry is displayed as

use std::fmt;
use std::path::{Path, PathBuf};

/// Fixed icon shown when no thumbnail can or should be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackIcon {
    Folder,
    File,
}

impl FallbackIcon {
    /// Stable identifier handed to the UI layer
    pub fn id(self) -> &'static str {
        match self {
            FallbackIcon::Folder => "folder",
            FallbackIcon::File => "file",
        }
    }
}

/// Result of resolving an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Image file to display: the source itself or a generated file
    Path(PathBuf),
    /// Fallback icon, never cached
    Icon(FallbackIcon),
}

impl Thumbnail {
    pub fn folder() -> Self {
        Thumbnail::Icon(FallbackIcon::Folder)
    }

    pub fn file() -> Self {
        Thumbnail::Icon(FallbackIcon::File)
    }

    /// Path to display, if this is not a fallback icon
    pub fn path(&self) -> Option<&Path> {
        match self {
            Thumbnail::Path(p) => Some(p),
            Thumbnail::Icon(_) => None,
        }
    }

    /// Whether this is a real image rather than a recomputed fallback
    pub fn is_final(&self) -> bool {
        matches!(self, Thumbnail::Path(_))
    }

    /// Short kind tag used by the JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Thumbnail::Path(_) => "path",
            Thumbnail::Icon(_) => "icon",
        }
    }
}

impl fmt::Display for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thumbnail::Path(p) => write!(f, "{}", p.display()),
            Thumbnail::Icon(icon) => write!(f, "icon:{}", icon.id()),
        }
    }
}
