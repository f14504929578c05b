//! Job phase definitions.
//!
//! The generation service moves a job through an ordered set of phases:
//! `pending → processing → generating_script → generating_audio →
//! generating_video → done`, with `failed` reachable from any non-terminal
//! phase. Phase names the service may add later deserialize to
//! [`Phase::Unknown`] instead of failing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Phase of a video generation job, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepted, waiting for a worker
    #[default]
    Pending,
    /// Picked up by a worker
    Processing,
    /// Writing the review script
    GeneratingScript,
    /// Synthesizing the voice-over
    GeneratingAudio,
    /// Rendering the video
    GeneratingVideo,
    /// Finished successfully
    Done,
    /// Finished with an error
    Failed,
    /// A phase name this client does not recognize
    #[serde(other)]
    Unknown,
}

impl Phase {
    /// Every phase the service documents, in happy-path order, then `Failed`.
    pub const ALL: &'static [Phase] = &[
        Phase::Pending,
        Phase::Processing,
        Phase::GeneratingScript,
        Phase::GeneratingAudio,
        Phase::GeneratingVideo,
        Phase::Done,
        Phase::Failed,
    ];

    /// Wire name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Processing => "processing",
            Phase::GeneratingScript => "generating_script",
            Phase::GeneratingAudio => "generating_audio",
            Phase::GeneratingVideo => "generating_video",
            Phase::Done => "done",
            Phase::Failed => "failed",
            Phase::Unknown => "unknown",
        }
    }

    /// Cosmetic progress percentage shown for this phase.
    ///
    /// This is a fixed lookup, not a measure of work completed.
    pub fn progress_percent(&self) -> u8 {
        match self {
            Phase::Pending => 10,
            Phase::Processing => 20,
            Phase::GeneratingScript => 35,
            Phase::GeneratingAudio => 55,
            Phase::GeneratingVideo => 80,
            Phase::Done => 100,
            Phase::Failed => 0,
            Phase::Unknown => 0,
        }
    }

    /// User-facing label for this phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Pending => "Waiting in queue",
            Phase::Processing => "Processing",
            Phase::GeneratingScript => "Writing review script",
            Phase::GeneratingAudio => "Recording voice-over",
            Phase::GeneratingVideo => "Rendering video",
            Phase::Done => "Done",
            Phase::Failed => "Failed",
            Phase::Unknown => "Unknown",
        }
    }

    /// Position in the happy-path ordering.
    ///
    /// `Failed` and `Unknown` sit outside the ordering and return `None`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Phase::Pending => Some(0),
            Phase::Processing => Some(1),
            Phase::GeneratingScript => Some(2),
            Phase::GeneratingAudio => Some(3),
            Phase::GeneratingVideo => Some(4),
            Phase::Done => Some(5),
            Phase::Failed | Phase::Unknown => None,
        }
    }

    /// Check if this is a terminal phase (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }

    /// True when moving from `self` to `next` goes backwards in the ordering.
    ///
    /// Transitions involving `Failed` or `Unknown` are never regressions.
    pub fn is_regression_to(&self, next: Phase) -> bool {
        match (self.rank(), next.rank()) {
            (Some(current), Some(next)) => next < current,
            _ => false,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Phase::Pending),
            "processing" => Ok(Phase::Processing),
            "generating_script" => Ok(Phase::GeneratingScript),
            "generating_audio" => Ok(Phase::GeneratingAudio),
            "generating_video" => Ok(Phase::GeneratingVideo),
            "done" => Ok(Phase::Done),
            "failed" => Ok(Phase::Failed),
            _ => Err(PhaseParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown phase: {0}")]
pub struct PhaseParseError(String);
