//! Ordered strategy dispatch
//!
//! Rules are evaluated top to bottom and the first match decides the outcome.
//! Rules marked `deferred` do real extraction work and belong on the
//! background worker; everything above them is cheap enough to answer on the
//! caller's thread.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::art::{self, AudioContainer};
use super::tools::FrameExtractor;
use super::video;
use super::{FallbackReason, Outcome};
use crate::cache::ThumbnailCache;
use crate::core::{
    classify, extension_for_mime, is_passthrough_image, should_gate, Entry, FallbackIcon,
    Thumbnail, ThumbnailConfig, FLAC_MIMES, MP3_MIME,
};
use crate::error::ThumbError;

/// An entry plus what is known about it before any rule runs
struct Probe<'a> {
    entry: &'a Entry,
    mime: String,
    size: u32,
}

struct Rule {
    name: &'static str,
    /// Needs the background worker
    deferred: bool,
    matches: fn(&Dispatcher, &Probe) -> bool,
    handle: fn(&Dispatcher, &Probe) -> Outcome,
}

const RULES: &[Rule] = &[
    Rule {
        name: "directory",
        deferred: false,
        matches: |_, p| p.entry.is_dir,
        handle: |_, _| Outcome::Fallback(FallbackReason::Directory),
    },
    Rule {
        name: "gate",
        deferred: false,
        matches: |d, p| should_gate(d.threshold, p.entry.sibling_count),
        handle: |_, _| Outcome::Fallback(FallbackReason::Gated),
    },
    Rule {
        name: "cached",
        deferred: false,
        matches: |d, p| d.cache.contains(&p.entry.path),
        handle: |d, p| match d.cache.get(&p.entry.path) {
            Some(thumb) => Outcome::Passthrough(thumb),
            None => Outcome::Fallback(FallbackReason::CacheCleared),
        },
    },
    Rule {
        name: "image",
        deferred: false,
        matches: |_, p| is_passthrough_image(&p.mime, &p.entry.name),
        handle: |_, p| Outcome::Passthrough(p.entry.path.clone()),
    },
    Rule {
        name: "mp3",
        deferred: true,
        matches: |_, p| p.mime == MP3_MIME,
        handle: |_, p| embedded_art(&p.entry.path, AudioContainer::Mp3),
    },
    Rule {
        name: "flac",
        deferred: true,
        matches: |_, p| FLAC_MIMES.contains(&p.mime.as_str()),
        handle: |_, p| embedded_art(&p.entry.path, AudioContainer::Flac),
    },
    Rule {
        name: "video",
        deferred: true,
        matches: |_, p| p.mime.starts_with("video/"),
        handle: |d, p| {
            video::frame_outcome(&d.extractor, &p.entry.path, p.size, d.overlay.as_deref())
        },
    },
    Rule {
        name: "unknown",
        deferred: false,
        matches: |_, _| true,
        handle: |_, _| Outcome::Fallback(FallbackReason::UnknownType),
    },
];

/// Resolves entries to thumbnails
pub struct Dispatcher {
    cache: Arc<ThumbnailCache>,
    extractor: FrameExtractor,
    threshold: i64,
    overlay: Option<PathBuf>,
}

impl Dispatcher {
    pub fn new(config: &ThumbnailConfig, cache: Arc<ThumbnailCache>) -> Self {
        Self::with_extractor(config, cache, FrameExtractor::new(config.tool_timeout))
    }

    /// Use a specific frame extractor instead of the avconv/ffmpeg default
    pub fn with_extractor(
        config: &ThumbnailConfig,
        cache: Arc<ThumbnailCache>,
        extractor: FrameExtractor,
    ) -> Self {
        if !art::tags_available() {
            debug!("built without audio tag support, audio files get the file icon");
        }
        Self {
            cache,
            extractor,
            threshold: config.threshold,
            overlay: config.usable_overlay().cloned(),
        }
    }

    pub fn cache(&self) -> &Arc<ThumbnailCache> {
        &self.cache
    }

    /// Answer without extraction work, if the entry allows it.
    ///
    /// Returns `None` when the entry has to go through the worker.
    pub fn quick(&self, entry: &Entry) -> Option<Thumbnail> {
        let probe = self.probe(entry, 0);
        let rule = self.first_match(&probe);
        if rule.deferred {
            return None;
        }
        Some(self.finish(entry, rule.name, (rule.handle)(self, &probe)))
    }

    /// Run the full chain, storing any generated image.
    ///
    /// Never fails: every error and panic ends in a fallback icon.
    pub fn resolve(&self, entry: &Entry, size: u32) -> Thumbnail {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let probe = self.probe(entry, size);
            let rule = self.first_match(&probe);
            (rule.name, (rule.handle)(self, &probe))
        }));

        match result {
            Ok((rule, outcome)) => self.finish(entry, rule, outcome),
            Err(_) => {
                warn!(path = %entry.path.display(), "thumbnail strategy panicked");
                self.finish(entry, "panic", Outcome::Fallback(FallbackReason::Panicked))
            }
        }
    }

    /// Outcome of the matching strategy, without touching the cache
    pub fn outcome(&self, entry: &Entry, size: u32) -> Outcome {
        let probe = self.probe(entry, size);
        (self.first_match(&probe).handle)(self, &probe)
    }

    fn probe<'a>(&self, entry: &'a Entry, size: u32) -> Probe<'a> {
        Probe {
            entry,
            mime: classify(&entry.name),
            size,
        }
    }

    fn first_match(&self, probe: &Probe) -> &'static Rule {
        RULES
            .iter()
            .find(|rule| (rule.matches)(self, probe))
            .unwrap_or(&RULES[RULES.len() - 1])
    }

    fn finish(&self, entry: &Entry, rule: &str, outcome: Outcome) -> Thumbnail {
        let resolved = match outcome {
            Outcome::Bytes { data, extension } => self
                .cache
                .store(&entry.path, &extension, &data)
                .map_err(|e| FallbackReason::CacheWrite(e.to_string())),
            Outcome::Passthrough(path) => Ok(path),
            Outcome::Fallback(reason) => Err(reason),
        };

        match resolved {
            Ok(path) => {
                debug!(path = %entry.path.display(), rule, thumb = %path.display(), "resolved");
                Thumbnail::Path(path)
            }
            Err(FallbackReason::Directory) => Thumbnail::Icon(FallbackIcon::Folder),
            Err(reason) => {
                debug!(path = %entry.path.display(), rule, %reason, "fallback icon");
                Thumbnail::Icon(FallbackIcon::File)
            }
        }
    }
}

/// Embedded cover art of an audio file
fn embedded_art(path: &Path, container: AudioContainer) -> Outcome {
    match art::read_pictures(path, container) {
        Ok(pictures) => match art::pick_picture(pictures) {
            Some(picture) if !picture.data.is_empty() => Outcome::Bytes {
                extension: extension_for_mime(&picture.mime),
                data: picture.data,
            },
            _ => Outcome::Fallback(FallbackReason::NoEmbeddedArt),
        },
        Err(ThumbError::Unsupported(_)) => Outcome::Fallback(FallbackReason::CapabilityUnavailable),
        Err(e) => Outcome::Fallback(FallbackReason::TagError(e.to_string())),
    }
}
