//! Video frame strategy

use std::path::Path;

use tracing::debug;

use super::tools::FrameExtractor;
use super::{FallbackReason, Outcome};
use crate::error::ThumbError;

/// Fit an image of `width` x `height` inside a `max` square keeping its ratio
pub fn compute_size(max: u32, width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max, max);
    }
    let scale = |a: u32, b: u32| ((max as u64 * a as u64) / b as u64).max(1) as u32;
    if width > height {
        (max, scale(height, width))
    } else {
        (scale(width, height), max)
    }
}

/// Grab one frame of `path` as PNG, optionally with `overlay` on top
pub fn frame_outcome(
    extractor: &FrameExtractor,
    path: &Path,
    size: u32,
    overlay: Option<&Path>,
) -> Outcome {
    if extractor.binary().is_none() {
        return Outcome::Fallback(FallbackReason::ToolMissing);
    }

    match extractor.extract_frame(path, size, overlay) {
        Ok(data) if is_png(&data) => {
            if let Some((w, h)) = png_dimensions(&data) {
                debug!(
                    video = %path.display(),
                    width = w,
                    height = h,
                    fit = ?compute_size(size, w, h),
                    "frame extracted"
                );
            }
            Outcome::Bytes {
                data,
                extension: "png".to_string(),
            }
        }
        Ok(_) => Outcome::Fallback(FallbackReason::EmptyOutput),
        Err(ThumbError::Timeout { .. }) => Outcome::Fallback(FallbackReason::TimedOut),
        Err(e) => Outcome::Fallback(FallbackReason::ToolFailed(e.to_string())),
    }
}

fn is_png(data: &[u8]) -> bool {
    matches!(image::guess_format(data), Ok(image::ImageFormat::Png))
}

/// Width and height from the IHDR chunk
fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let ihdr = data.get(16..24)?;
    let width = u32::from_be_bytes(ihdr[0..4].try_into().ok()?);
    let height = u32::from_be_bytes(ihdr[4..8].try_into().ok()?);
    Some((width, height))
}
