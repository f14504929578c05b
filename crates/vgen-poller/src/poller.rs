//! Async job poller.
//!
//! [`JobPoller::spawn`] starts one task per job. The task issues a status
//! request immediately and then once per interval, feeds each result through
//! a [`PollTracker`], and stops on the first terminal event. Exactly one
//! request is in flight at a time.
//!
//! The returned [`PollHandle`] owns the task. Cancelling or dropping it stops
//! polling right away, abandoning any in-flight request without firing a
//! callback.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, info_span, warn, Instrument};

use vgen_models::{JobProgress, VideoId, VideoStatus};

use crate::config::PollerConfig;
use crate::source::StatusSource;
use crate::tracker::{PollEvent, PollTracker};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Receives a job's progress and its terminal result.
///
/// `on_success` or `on_failure` is called at most once per poll, and never
/// after the handle has been cancelled.
pub trait PollObserver: Send + 'static {
    /// Displayed progress changed.
    fn on_progress(&mut self, _progress: &JobProgress) {}

    /// Job reached `done`.
    fn on_success(&mut self, _status: &VideoStatus) {}

    /// Job failed or the poller gave up.
    fn on_failure(&mut self, _message: &str) {}
}

/// Observer that ignores everything; use the handle's outcome instead.
impl PollObserver for () {}

/// Observer built from a pair of terminal callbacks.
pub struct Callbacks<S, F> {
    on_success: S,
    on_failure: F,
}

impl<S, F> PollObserver for Callbacks<S, F>
where
    S: FnMut(&VideoStatus) + Send + 'static,
    F: FnMut(&str) + Send + 'static,
{
    fn on_success(&mut self, status: &VideoStatus) {
        (self.on_success)(status)
    }

    fn on_failure(&mut self, message: &str) {
        (self.on_failure)(message)
    }
}

/// Wrap terminal callbacks as a [`PollObserver`].
pub fn callbacks<S, F>(on_success: S, on_failure: F) -> Callbacks<S, F>
where
    S: FnMut(&VideoStatus) + Send + 'static,
    F: FnMut(&str) + Send + 'static,
{
    Callbacks {
        on_success,
        on_failure,
    }
}

/// How a poll ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Completed(VideoStatus),
    Failed(String),
    Cancelled,
}

/// Spawns status pollers against a [`StatusSource`].
pub struct JobPoller<S> {
    source: Arc<S>,
    config: PollerConfig,
}

impl<S> Clone for JobPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<S: StatusSource + 'static> JobPoller<S> {
    /// Create a poller owning its source.
    pub fn new(source: S, config: PollerConfig) -> Self {
        Self::with_shared(Arc::new(source), config)
    }

    /// Create a poller over a shared source.
    pub fn with_shared(source: Arc<S>, config: PollerConfig) -> Self {
        Self { source, config }
    }

    /// Start polling `video_id` on the current runtime.
    pub fn spawn<O: PollObserver>(&self, video_id: VideoId, observer: O) -> PollHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (progress_tx, progress_rx) = watch::channel(JobProgress::initial());

        let span = info_span!("poll", video_id = %video_id);
        let task = tokio::spawn(
            run_poll_loop(
                Arc::clone(&self.source),
                video_id.clone(),
                self.config.clone(),
                observer,
                shutdown_rx,
                progress_tx,
            )
            .instrument(span),
        );

        PollHandle {
            video_id,
            shutdown: shutdown_tx,
            progress: progress_rx,
            task: Some(task),
        }
    }
}

/// Handle to a running poll. Dropping it cancels the poll.
pub struct PollHandle {
    video_id: VideoId,
    shutdown: watch::Sender<bool>,
    progress: watch::Receiver<JobProgress>,
    task: Option<JoinHandle<PollOutcome>>,
}

impl PollHandle {
    /// Job being polled.
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Stop polling. No callback fires after this returns.
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    /// Receiver for the displayed progress.
    pub fn progress(&self) -> watch::Receiver<JobProgress> {
        self.progress.clone()
    }

    /// Wait for the poll to end.
    pub async fn wait(mut self) -> PollOutcome {
        let Some(task) = self.task.take() else {
            return PollOutcome::Cancelled;
        };

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(video_id = %self.video_id, error = %e, "Poll task aborted");
                PollOutcome::Cancelled
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

async fn run_poll_loop<S, O>(
    source: Arc<S>,
    video_id: VideoId,
    config: PollerConfig,
    mut observer: O,
    mut shutdown_rx: watch::Receiver<bool>,
    progress_tx: watch::Sender<JobProgress>,
) -> PollOutcome
where
    S: StatusSource,
    O: PollObserver,
{
    let mut tracker = PollTracker::new(config.max_consecutive_failures);
    let mut ticker = interval(config.interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq: u64 = 0;

    info!(
        interval_ms = config.interval.as_millis() as u64,
        max_failures = ?config.max_consecutive_failures,
        "Polling job status"
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown_requested(&mut shutdown_rx) => {
                debug!("Polling cancelled");
                return PollOutcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        seq += 1;

        let result = tokio::select! {
            biased;
            _ = shutdown_requested(&mut shutdown_rx) => {
                debug!(seq, "Polling cancelled with a request in flight");
                return PollOutcome::Cancelled;
            }
            result = source.fetch_status(&video_id) => result,
        };

        if *shutdown_rx.borrow() {
            debug!(seq, "Discarding response received after cancel");
            return PollOutcome::Cancelled;
        }

        let event = match result {
            Ok(snapshot) => tracker.observe(seq, snapshot),
            Err(e) => {
                warn!(
                    seq,
                    error = %e,
                    http_status = ?e.http_status(),
                    transient = e.is_transient(),
                    failures = tracker.consecutive_failures() + 1,
                    "Status request failed"
                );
                tracker.record_error(seq, &e)
            }
        };

        match event {
            PollEvent::Progress(progress) => {
                let changed = progress_tx.send_if_modified(|current| {
                    if *current == progress {
                        return false;
                    }
                    *current = progress.clone();
                    true
                });
                if changed {
                    debug!(phase = %progress.phase, percent = progress.percent, "Progress updated");
                    observer.on_progress(&progress);
                }
            }
            PollEvent::Completed(status) => {
                progress_tx.send_replace(tracker.progress().clone());
                info!(video_url = ?status.video_url, "Video generation completed");
                observer.on_success(&status);
                return PollOutcome::Completed(status);
            }
            PollEvent::Failed(message) => {
                progress_tx.send_replace(tracker.progress().clone());
                warn!(error = %message, "Video generation failed");
                observer.on_failure(&message);
                return PollOutcome::Failed(message);
            }
            PollEvent::Ignored => {}
        }
    }
}

/// Resolves once shutdown is signalled or the handle is gone.
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}
