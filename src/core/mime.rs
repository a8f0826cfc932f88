//! Filename based mime classification
//!
//! Purely an extension guess: no I/O and no content sniffing.

/// Mime type of MP3 audio
pub const MP3_MIME: &str = "audio/mpeg";

/// Mime types FLAC audio is reported under
pub const FLAC_MIMES: &[&str] = &["audio/flac", "audio/x-flac"];

/// Guess the mime type of a file name.
///
/// Unknown or missing extensions yield an empty string.
pub fn classify(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .map(str::to_string)
        .unwrap_or_default()
}

/// Check whether a still image can be shown as-is.
///
/// Only jpeg, gif and png are accepted; the ambiguous `.jpe` spelling is
/// left out even though it classifies as jpeg.
pub fn is_passthrough_image(mime: &str, name: &str) -> bool {
    if !mime.starts_with("image/") {
        return false;
    }
    let supported = ["jpeg", "jpg", "gif", "png"]
        .iter()
        .any(|kind| mime.contains(kind));

    supported && !name.to_lowercase().ends_with(".jpe")
}

/// File extension (without dot) to store an embedded picture under.
///
/// Tag writers are sloppy about picture mimes: ID3v2.2 stores bare
/// `PNG`/`JPG` format codes and some encoders omit the `image/` prefix.
pub fn extension_for_mime(mime: &str) -> String {
    let mime = mime.trim().to_lowercase();
    let bare = mime.strip_prefix("image/").unwrap_or(&mime);

    match bare {
        "jpeg" | "jpg" | "pjpeg" => return "jpg".to_string(),
        "png" => return "png".to_string(),
        "gif" => return "gif".to_string(),
        "bmp" => return "bmp".to_string(),
        "webp" => return "webp".to_string(),
        _ => {}
    }

    let guessed = mime_guess::get_mime_extensions_str(&mime)
        .and_then(|exts| exts.first())
        .copied();

    match guessed {
        Some("jpe") => "jpg".to_string(),
        Some(ext) => ext.to_string(),
        None => "bin".to_string(),
    }
}
