//! Video job resources.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::phase::Phase;
use crate::style::Style;
use crate::timestamp;

/// Message used when the service reports `failed` without an error message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Video generation failed";

/// Opaque identifier of a video generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap an identifier. Blank ids are rejected; anything
    /// else is kept exactly as given.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, VideoIdError> {
        let s = s.as_ref();
        if s.trim().is_empty() {
            return Err(VideoIdError::Empty);
        }
        Ok(Self(s.to_string()))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = VideoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    #[error("Video ID cannot be empty")]
    Empty,
}

/// Full video job resource (`GET /api/videos/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoJob {
    pub id: VideoId,
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub style: Style,
    pub status: Phase,
    /// Generated review script
    #[serde(default)]
    pub script: Option<String>,
    /// Server-side path of the voice-over
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Server-side path of the finished video
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(with = "timestamp::service_time")]
    #[schemars(with = "DateTime<Utc>")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::service_time")]
    #[schemars(with = "DateTime<Utc>")]
    pub updated_at: DateTime<Utc>,
}

impl VideoJob {
    /// Error message to show for a failed job.
    pub fn failure_message(&self) -> String {
        failure_message_or_default(self.error_message.as_deref())
    }

    /// File name the service suggests for downloads: `{product_name}_review.mp4`
    /// with spaces replaced by underscores.
    pub fn suggested_file_name(&self) -> String {
        format!("{}_review.mp4", self.product_name.trim().replace(' ', "_"))
    }

    /// Abbreviated status view of this job.
    pub fn to_status(&self) -> VideoStatus {
        VideoStatus {
            id: self.id.clone(),
            status: self.status,
            video_url: self.video_url.clone(),
            error_message: self.error_message.clone(),
            progress_message: String::new(),
        }
    }
}

/// Abbreviated status resource (`GET /api/videos/{id}/status`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoStatus {
    pub id: VideoId,
    pub status: Phase,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Advisory status text from the service
    #[serde(default)]
    pub progress_message: String,
}

impl VideoStatus {
    /// Error message to show for a failed job.
    pub fn failure_message(&self) -> String {
        failure_message_or_default(self.error_message.as_deref())
    }
}

fn failure_message_or_default(message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}
