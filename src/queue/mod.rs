//! Generation queue drained by a single background worker
//!
//! Jobs are processed strictly in submission order by at most one worker
//! thread. The worker is spawned on demand and exits once it finds the queue
//! empty; both decisions are taken under the queue lock, so two submissions
//! racing each other can never start two workers.

mod job;

pub use job::{Callback, JobHandle, JobState, Submission};

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::ThumbnailCache;
use crate::core::{Entry, Thumbnail, ThumbnailConfig};
use crate::error::Result;
use crate::extract::{Dispatcher, FrameExtractor};
use job::ThumbnailJob;

#[derive(Default)]
struct QueueState {
    jobs: VecDeque<ThumbnailJob>,
    worker_active: bool,
    processing: Option<JobHandle>,
    next_id: u64,
}

struct Shared {
    state: Mutex<QueueState>,
    /// Signalled when the worker exits
    idle: Condvar,
    dispatcher: Dispatcher,
    callback: RwLock<Option<Arc<Callback>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Thumbnail subsystem: cache, dispatcher and generation queue
pub struct Thumbnailer {
    shared: Arc<Shared>,
    config: ThumbnailConfig,
}

impl Thumbnailer {
    /// Create the thumbnail directory and an idle queue
    pub fn new(config: ThumbnailConfig) -> Result<Self> {
        let extractor = FrameExtractor::new(config.tool_timeout);
        Self::with_extractor(config, extractor)
    }

    /// Like [`Thumbnailer::new`] with a specific frame extractor
    pub fn with_extractor(config: ThumbnailConfig, extractor: FrameExtractor) -> Result<Self> {
        let cache = Arc::new(ThumbnailCache::new(config.thumb_dir.as_deref())?);
        let dispatcher = Dispatcher::with_extractor(&config, cache, extractor);

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState::default()),
                idle: Condvar::new(),
                dispatcher,
                callback: RwLock::new(None),
            }),
            config,
        })
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Register the function queued results are delivered to.
    ///
    /// It runs on the worker thread; a later registration replaces it.
    pub fn on_resolved<F>(&self, callback: F)
    where
        F: Fn(JobHandle, Thumbnail) + Send + Sync + 'static,
    {
        *self
            .shared
            .callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    /// Resolve `entry`, on the spot if possible, otherwise through the worker
    pub fn submit(&self, entry: Entry, size: u32) -> Submission {
        if let Some(thumb) = self.shared.dispatcher.quick(&entry) {
            return Submission::Ready(thumb);
        }

        let mut state = self.shared.lock();
        let handle = JobHandle(state.next_id);
        state.next_id += 1;
        debug!(job = %handle, path = %entry.path.display(), "queued");
        state.jobs.push_back(ThumbnailJob {
            handle,
            entry,
            size,
        });

        if !state.worker_active {
            let shared = Arc::clone(&self.shared);
            let spawned = thread::Builder::new()
                .name("thumbview-worker".to_string())
                .spawn(move || worker_loop(shared));
            match spawned {
                Ok(_) => state.worker_active = true,
                // Left queued; the next submission tries again
                Err(e) => warn!("failed to spawn thumbnail worker: {}", e),
            }
        }

        Submission::Queued(handle)
    }

    /// Submit with the configured thumbnail size
    pub fn submit_default(&self, entry: Entry) -> Submission {
        self.submit(entry, self.config.size)
    }

    /// Thumbnail generated earlier for `path`
    pub fn get_cached(&self, path: &Path) -> Option<PathBuf> {
        self.shared.dispatcher.cache().get(path)
    }

    /// Directory generated thumbnails live in
    pub fn thumb_dir(&self) -> &Path {
        self.shared.dispatcher.cache().dir()
    }

    /// Remove every generated thumbnail; call when the application stops
    pub fn clear(&self) {
        self.shared.dispatcher.cache().clear();
    }

    pub fn is_worker_active(&self) -> bool {
        self.shared.lock().worker_active
    }

    /// Jobs waiting for the worker (the one being processed excluded)
    pub fn pending(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    pub fn job_state(&self, handle: JobHandle) -> Option<JobState> {
        let state = self.shared.lock();
        if handle.0 >= state.next_id {
            None
        } else if state.processing == Some(handle) {
            Some(JobState::Processing)
        } else if state.jobs.iter().any(|job| job.handle == handle) {
            Some(JobState::Queued)
        } else {
            Some(JobState::Resolved)
        }
    }

    /// Block until the worker has drained the queue and exited
    pub fn wait_idle(&self) {
        let mut state = self.shared.lock();
        while state.worker_active {
            state = self
                .shared
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// [`Thumbnailer::wait_idle`] with a limit; returns false on timeout
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let state = self.shared.lock();
        let (state, _) = self
            .shared
            .idle
            .wait_timeout_while(state, timeout, |s| s.worker_active)
            .unwrap_or_else(PoisonError::into_inner);
        !state.worker_active
    }
}

/// Worker thread main loop
fn worker_loop(shared: Arc<Shared>) {
    debug!("thumbnail worker started");
    loop {
        let job = {
            let mut state = shared.lock();
            match state.jobs.pop_front() {
                Some(job) => {
                    state.processing = Some(job.handle);
                    job
                }
                None => {
                    state.worker_active = false;
                    state.processing = None;
                    shared.idle.notify_all();
                    debug!("thumbnail worker exiting, queue empty");
                    return;
                }
            }
        };

        let thumb = shared.dispatcher.resolve(&job.entry, job.size);

        let callback = shared
            .callback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            let delivered = panic::catch_unwind(AssertUnwindSafe(|| callback(job.handle, thumb)));
            if delivered.is_err() {
                warn!(job = %job.handle, "completion callback panicked");
            }
        }

        shared.lock().processing = None;
    }
}
