//! Displayed progress snapshot.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::phase::Phase;
use crate::video::VideoStatus;

/// What a progress view shows for a job: phase, percentage, label and the
/// service's advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobProgress {
    pub phase: Phase,
    /// Progress percentage (0-100)
    pub percent: u8,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobProgress {
    /// Progress for a phase with no service message.
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            phase,
            percent: phase.progress_percent(),
            label: phase.label().to_string(),
            message: None,
        }
    }

    /// Snapshot shown before the first status response arrives.
    pub fn initial() -> Self {
        Self::for_phase(Phase::Pending)
    }

    /// Progress derived from a status response.
    pub fn from_status(status: &VideoStatus) -> Self {
        let message = Some(status.progress_message.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            message,
            ..Self::for_phase(status.status)
        }
    }
}

impl Default for JobProgress {
    fn default() -> Self {
        Self::initial()
    }
}
