//! Client for the product video generation service.
//!
//! This crate provides:
//! - Multipart job submission (name, description, style, up to three images)
//! - Full and abbreviated job status queries
//! - Streaming video download and stream URL resolution
//! - Error classification into transient and permanent failures

pub mod client;
pub mod error;
pub mod metrics;
pub mod types;

pub use client::{ClientConfig, VideoClient};
pub use error::{ClientError, ClientResult};
pub use types::{CreateVideoRequest, HealthResponse, ImageUpload, MAX_IMAGES};
