//! Shared data models for the video generation client.
//!
//! This crate provides Serde-serializable types for:
//! - Video job resources returned by the generation service
//! - Job phases and their progress/label tables
//! - Video styles
//! - The displayed progress snapshot

pub mod phase;
pub mod progress;
pub mod style;
pub mod timestamp;
pub mod video;

// Re-export common types
pub use phase::{Phase, PhaseParseError};
pub use progress::JobProgress;
pub use style::{Style, StyleParseError};
pub use video::{VideoId, VideoIdError, VideoJob, VideoStatus, GENERIC_FAILURE_MESSAGE};
