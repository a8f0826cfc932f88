//! External tool invocation (ffmpeg/avconv, ImageMagick)
//!
//! Binaries are located through `PATH` once per name and the answer is kept
//! for the lifetime of the process. Every invocation runs under a deadline:
//! a tool that hangs is killed and reported as [`ThumbError::Timeout`].

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, ThumbError};

/// Frame extractors in order of preference
pub const FRAME_EXTRACTORS: &[&str] = &["avconv", "ffmpeg"];

/// ImageMagick compositor used by [`stack_images`]
pub const CONVERT_BIN: &str = "convert";

/// Seek offset of the extracted frame
const SEEK_OFFSET: &str = "00:00:01";

/// Cached binary lookups, keyed by name
static BINARY_PATHS: OnceLock<Mutex<HashMap<String, Option<PathBuf>>>> = OnceLock::new();

/// Find an executable on `PATH` (lazy detection with caching).
///
/// Names containing a path separator are checked as given.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    let cache = BINARY_PATHS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(name.to_string())
        .or_insert_with(|| {
            let found = which::which(name).ok();
            debug!(binary = name, found = ?found, "binary lookup");
            found
        })
        .clone()
}

/// Captured result of a finished tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
}

/// Run `cmd` to completion, capturing stdout, killing it after `timeout`.
///
/// stderr is discarded and stdin is closed. On unix the tool runs in its own
/// process group, so a timeout also kills anything it spawned.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<ToolOutput> {
    let tool = cmd.get_program().to_string_lossy().to_string();
    let deadline = Instant::now() + timeout;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ThumbError::tool(format!("{}: stdout not captured", tool)))?;

    // Reading on a separate thread keeps a full pipe from blocking the child
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = stdout.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(read);
    });

    let stdout = match rx.recv_timeout(timeout) {
        Ok(read) => read?,
        Err(RecvTimeoutError::Timeout) => {
            kill(&mut child);
            return Err(ThumbError::timeout(tool, timeout));
        }
        Err(RecvTimeoutError::Disconnected) => {
            kill(&mut child);
            return Err(ThumbError::tool(format!("{}: output reader died", tool)));
        }
    };

    let status = wait_until(&mut child, deadline)
        .ok_or_else(|| ThumbError::timeout(tool.as_str(), timeout))?;

    Ok(ToolOutput { status, stdout })
}

/// Poll the child until it exits or the deadline passes (then kill it)
fn wait_until(child: &mut Child, deadline: Instant) -> Option<ExitStatus> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
            Ok(None) | Err(_) => {
                kill(child);
                return None;
            }
        }
    }
}

fn kill(child: &mut Child) {
    // Grandchildren may still hold the stdout pipe open
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: signals a group this process created. The leader is not
            // reaped yet, so its id cannot have been reused.
            unsafe {
                libc::kill(-pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Extracts a single PNG frame from a video with an external decoder
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    candidates: Vec<String>,
    timeout: Duration,
}

impl FrameExtractor {
    /// Use the default avconv/ffmpeg preference order
    pub fn new(timeout: Duration) -> Self {
        Self::with_candidates(FRAME_EXTRACTORS.iter().copied(), timeout)
    }

    /// Use a custom preference order (names or paths)
    pub fn with_candidates<I, S>(candidates: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// First candidate found on the system
    pub fn binary(&self) -> Option<PathBuf> {
        self.candidates.iter().find_map(|name| find_binary(name))
    }

    /// Extract the frame at one second as PNG bytes.
    ///
    /// With an `overlay` the frame and overlay are both scaled to `size` and
    /// the overlay is centered on the frame in the same invocation.
    pub fn extract_frame(&self, path: &Path, size: u32, overlay: Option<&Path>) -> Result<Vec<u8>> {
        let binary = self
            .binary()
            .ok_or_else(|| ThumbError::tool("no frame extractor found"))?;

        let mut cmd = Command::new(&binary);
        cmd.args(frame_args(path, size, overlay));
        debug!(tool = %binary.display(), video = %path.display(), "extracting frame");

        let output = run_with_timeout(cmd, self.timeout)?;
        if !output.status.success() {
            return Err(ThumbError::tool(format!(
                "{} exited with {}",
                binary.display(),
                output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(ThumbError::tool(format!("{} produced no output", binary.display())));
        }
        Ok(output.stdout)
    }
}

/// Argument list for a single-frame PNG extraction written to stdout
pub fn frame_args(input: &Path, size: u32, overlay: Option<&Path>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-i".into(), input.into()];

    if let Some(overlay) = overlay {
        args.push("-i".into());
        args.push(overlay.into());
        args.push("-filter_complex".into());
        args.push(overlay_filter(size).into());
    }

    args.extend(
        [
            "-an", "-vcodec", "png", "-vframes", "1", "-ss", SEEK_OFFSET, "-y", "-f", "rawvideo",
            "-",
        ]
        .iter()
        .map(OsString::from),
    );
    args
}

/// Scale frame and overlay to fit `size`, then center the overlay
fn overlay_filter(size: u32) -> String {
    format!(
        "[0:v]scale={s}:{s}:force_original_aspect_ratio=decrease[bg];\
         [1:v]scale={s}:{s}:force_original_aspect_ratio=decrease[fg];\
         [bg][fg]overlay=(W-w)/2:(H-h)/2",
        s = size
    )
}

/// Composite `fg` centered over `bg` into `out` with ImageMagick
pub fn stack_images(bg: &Path, fg: &Path, out: &Path, timeout: Duration) -> Result<()> {
    let convert = find_binary(CONVERT_BIN)
        .ok_or_else(|| ThumbError::tool(format!("{} not found", CONVERT_BIN)))?;
    stack_images_with(&convert, bg, fg, out, timeout)
}

/// [`stack_images`] with an explicit compositor binary
pub fn stack_images_with(
    convert: &Path,
    bg: &Path,
    fg: &Path,
    out: &Path,
    timeout: Duration,
) -> Result<()> {
    let mut cmd = Command::new(convert);
    cmd.arg(bg)
        .args(["-gravity", "Center"])
        .arg(fg)
        .args(["-compose", "Over", "-composite"])
        .arg(out);

    let output = run_with_timeout(cmd, timeout)?;
    if !output.status.success() {
        return Err(ThumbError::tool(format!(
            "{} exited with {}",
            convert.display(),
            output.status
        )));
    }
    if !out.is_file() {
        return Err(ThumbError::tool(format!(
            "{} did not write {}",
            convert.display(),
            out.display()
        )));
    }
    Ok(())
}
