//! Embedded cover art in audio tags
//!
//! MP3 pictures come from ID3 APIC frames, FLAC pictures from the native
//! PICTURE metadata blocks. Both readers are behind the `audio-tags` feature;
//! without it they report [`ThumbError::Unsupported`].

use std::path::Path;

use crate::error::{Result, ThumbError};

/// Container format the pictures are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioContainer {
    Mp3,
    Flac,
}

/// One picture found in a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPicture {
    /// Declared mime type, as written by the tagger
    pub mime: String,
    /// Declared as the front cover
    pub front_cover: bool,
    pub data: Vec<u8>,
}

/// Pick the picture to use as thumbnail.
///
/// The first picture declared as front cover wins, otherwise the first
/// picture in tag order. Empty input yields nothing.
pub fn pick_picture(pictures: Vec<EmbeddedPicture>) -> Option<EmbeddedPicture> {
    let index = pictures.iter().position(|p| p.front_cover).unwrap_or(0);
    pictures.into_iter().nth(index)
}

/// Read every embedded picture of `path`
pub fn read_pictures(path: &Path, container: AudioContainer) -> Result<Vec<EmbeddedPicture>> {
    match container {
        AudioContainer::Mp3 => read_id3(path),
        AudioContainer::Flac => read_flac(path),
    }
}

/// Whether tag reading was compiled in
pub fn tags_available() -> bool {
    cfg!(feature = "audio-tags")
}

#[cfg(feature = "audio-tags")]
fn read_id3(path: &Path) -> Result<Vec<EmbeddedPicture>> {
    use id3::TagLike;

    let tag = match id3::Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => return Ok(Vec::new()),
        Err(e) => return Err(ThumbError::tags(e.to_string())),
    };

    Ok(tag
        .pictures()
        .map(|p| EmbeddedPicture {
            mime: p.mime_type.clone(),
            front_cover: p.picture_type == id3::frame::PictureType::CoverFront,
            data: p.data.clone(),
        })
        .collect())
}

#[cfg(feature = "audio-tags")]
fn read_flac(path: &Path) -> Result<Vec<EmbeddedPicture>> {
    let tag = metaflac::Tag::read_from_path(path).map_err(|e| ThumbError::tags(e.to_string()))?;

    Ok(tag
        .pictures()
        .map(|p| EmbeddedPicture {
            mime: p.mime_type.clone(),
            front_cover: p.picture_type == metaflac::block::PictureType::CoverFront,
            data: p.data.clone(),
        })
        .collect())
}

#[cfg(not(feature = "audio-tags"))]
fn read_id3(_path: &Path) -> Result<Vec<EmbeddedPicture>> {
    Err(ThumbError::unsupported("built without ID3 support"))
}

#[cfg(not(feature = "audio-tags"))]
fn read_flac(_path: &Path) -> Result<Vec<EmbeddedPicture>> {
    Err(ThumbError::unsupported("built without FLAC support"))
}
