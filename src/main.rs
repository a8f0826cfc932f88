//! thumbview - resolve file browser thumbnails from the command line

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use thumbview::app::{exit_code, logging, write_results, Config};
use thumbview::{Entry, JobHandle, Submission, Thumbnail, Thumbnailer};

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    logging::init(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let thumbnailer = Thumbnailer::new(config.thumbnails.clone())?;

    let resolved: Arc<Mutex<HashMap<JobHandle, Thumbnail>>> = Arc::default();
    let sink = Arc::clone(&resolved);
    thumbnailer.on_resolved(move |handle, thumb| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, thumb);
    });

    let mut submissions = Vec::with_capacity(config.paths.len());
    for path in &config.paths {
        let entry = Entry::from_path(path)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        let shown = entry.path.clone();
        submissions.push((shown, thumbnailer.submit_default(entry)));
    }

    thumbnailer.wait_idle();

    let mut resolved = resolved.lock().unwrap_or_else(PoisonError::into_inner);
    let results: Vec<(PathBuf, Thumbnail)> = submissions
        .into_iter()
        .map(|(path, submission)| {
            let thumb = match submission {
                Submission::Ready(thumb) => thumb,
                Submission::Queued(handle) => {
                    resolved.remove(&handle).unwrap_or_else(Thumbnail::file)
                }
            };
            (path, thumb)
        })
        .collect();

    write_results(&mut io::stdout().lock(), &results, config.output_format)?;

    if !config.keep {
        thumbnailer.clear();
    }
    Ok(())
}
