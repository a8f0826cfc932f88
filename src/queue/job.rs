//! Thumbnail jobs and their handles

use std::fmt;

use crate::core::{Entry, Thumbnail};

/// Opaque handle identifying a submitted job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobHandle(pub(crate) u64);

impl JobHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// Lifecycle of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Queued,
    Processing,
    /// Result handed to the completion callback
    Resolved,
}

/// Work item drained by the worker, consumed exactly once
pub(crate) struct ThumbnailJob {
    pub handle: JobHandle,
    pub entry: Entry,
    pub size: u32,
}

/// What [`crate::queue::Thumbnailer::submit`] did with an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Answered on the spot; the completion callback is not called
    Ready(Thumbnail),
    /// Queued for the worker; the callback receives the result
    Queued(JobHandle),
}

impl Submission {
    pub fn ready(&self) -> Option<&Thumbnail> {
        match self {
            Submission::Ready(thumb) => Some(thumb),
            Submission::Queued(_) => None,
        }
    }

    pub fn handle(&self) -> Option<JobHandle> {
        match self {
            Submission::Ready(_) => None,
            Submission::Queued(handle) => Some(*handle),
        }
    }
}

/// Completion callback, called on the worker thread
pub type Callback = dyn Fn(JobHandle, Thumbnail) + Send + Sync;
