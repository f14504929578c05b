//! Job status state machine.
//!
//! [`PollTracker`] consumes the results of successive status requests and
//! decides what each one means for the caller. It holds no I/O, so every
//! transition rule can be exercised synchronously:
//!
//! - results carry a request sequence number; anything not newer than the
//!   last applied result is discarded
//! - the first terminal observation (`done`, `failed`, a permanent error, or
//!   too many transient errors) latches the tracker; nothing after it is
//!   reported
//! - non-terminal phases are applied as reported, even when they move
//!   backwards in the phase ordering

use tracing::debug;

use vgen_client::ClientError;
use vgen_models::{JobProgress, Phase, VideoStatus};

/// Message reported when a status request is rejected or unreadable.
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to get video status";

/// What a single status result means to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// Job is still running; the displayed progress should be this
    Progress(JobProgress),
    /// Job finished successfully
    Completed(VideoStatus),
    /// Job failed, or the poller gave up on it
    Failed(String),
    /// Nothing to report (stale result, transient error, or already terminal)
    Ignored,
}

/// Tracks one job's observed state across status requests.
#[derive(Debug)]
pub struct PollTracker {
    progress: JobProgress,
    last_seq: Option<u64>,
    finished: bool,
    consecutive_failures: u32,
    max_consecutive_failures: Option<u32>,
}

impl PollTracker {
    /// Create a tracker. `max_consecutive_failures` of `None` or `Some(0)`
    /// tolerates transient failures indefinitely.
    pub fn new(max_consecutive_failures: Option<u32>) -> Self {
        Self {
            progress: JobProgress::initial(),
            last_seq: None,
            finished: false,
            consecutive_failures: 0,
            max_consecutive_failures: max_consecutive_failures.filter(|max| *max > 0),
        }
    }

    /// Currently displayed progress.
    pub fn progress(&self) -> &JobProgress {
        &self.progress
    }

    /// True once a terminal event has been reported.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Transient failures since the last successful response.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Apply a status snapshot returned by request `seq`.
    pub fn observe(&mut self, seq: u64, snapshot: VideoStatus) -> PollEvent {
        if !self.accept(seq) {
            return PollEvent::Ignored;
        }

        self.consecutive_failures = 0;

        if self.progress.phase.is_regression_to(snapshot.status) {
            debug!(
                from = %self.progress.phase,
                to = %snapshot.status,
                "Service reported an earlier phase, applying it"
            );
        }

        self.progress = JobProgress::from_status(&snapshot);

        match snapshot.status {
            Phase::Done => {
                self.finished = true;
                PollEvent::Completed(snapshot)
            }
            Phase::Failed => {
                self.finished = true;
                PollEvent::Failed(snapshot.failure_message())
            }
            _ => PollEvent::Progress(self.progress.clone()),
        }
    }

    /// Apply a failed status request `seq`.
    pub fn record_error(&mut self, seq: u64, error: &ClientError) -> PollEvent {
        if !self.accept(seq) {
            return PollEvent::Ignored;
        }

        if !error.is_transient() {
            self.finished = true;
            return PollEvent::Failed(STATUS_FAILURE_MESSAGE.to_string());
        }

        self.consecutive_failures += 1;

        match self.max_consecutive_failures {
            Some(max) if self.consecutive_failures >= max => {
                self.finished = true;
                PollEvent::Failed(format!(
                    "Lost contact with the video service after {} attempts",
                    self.consecutive_failures
                ))
            }
            _ => PollEvent::Ignored,
        }
    }

    /// Sequence and latch check shared by both result kinds.
    fn accept(&mut self, seq: u64) -> bool {
        if self.finished {
            debug!(seq, "Result after terminal state discarded");
            return false;
        }

        if let Some(last) = self.last_seq {
            if seq <= last {
                debug!(seq, last, "Stale result discarded");
                return false;
            }
        }

        self.last_seq = Some(seq);
        true
    }
}

impl Default for PollTracker {
    fn default() -> Self {
        Self::new(None)
    }
}
