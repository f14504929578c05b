//! Status poller for video generation jobs.
//!
//! This crate provides:
//! - [`PollTracker`]: the synchronous state machine deciding what each
//!   status result means (progress, completion, failure, or nothing)
//! - [`JobPoller`]: spawns one cancellable polling task per job
//! - [`StatusSource`]: the seam between the poller and the HTTP client
//!
//! ```no_run
//! use vgen_client::VideoClient;
//! use vgen_models::VideoId;
//! use vgen_poller::{JobPoller, PollOutcome, PollerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VideoClient::from_env()?;
//! let poller = JobPoller::new(client, PollerConfig::from_env());
//! let handle = poller.spawn(VideoId::parse("abc123")?, ());
//!
//! match handle.wait().await {
//!     PollOutcome::Completed(status) => println!("done: {:?}", status.video_url),
//!     PollOutcome::Failed(message) => eprintln!("failed: {message}"),
//!     PollOutcome::Cancelled => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod poller;
pub mod source;
pub mod tracker;

pub use config::PollerConfig;
pub use poller::{callbacks, Callbacks, JobPoller, PollHandle, PollObserver, PollOutcome};
pub use source::StatusSource;
pub use tracker::{PollEvent, PollTracker, STATUS_FAILURE_MESSAGE};
