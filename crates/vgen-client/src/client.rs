//! Video generation service HTTP client.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use vgen_models::{VideoId, VideoJob, VideoStatus};

use crate::error::{ClientError, ClientResult};
use crate::metrics::record_request;
use crate::types::{CreateVideoRequest, ErrorBody, HealthResponse};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the service client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the generation service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VGEN_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("VGEN_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("VGEN_API_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the video generation service.
#[derive(Debug, Clone)]
pub struct VideoClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl VideoClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the service is healthy.
    pub async fn health_check(&self) -> ClientResult<bool> {
        let url = format!("{}/health", self.base_url);

        match self.execute("health", self.http.get(&url)).await {
            Ok(response) => {
                let health: HealthResponse = Self::decode(response).await?;
                Ok(health.is_healthy())
            }
            Err(e) => {
                warn!("Service health check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Submit a new video generation request.
    pub async fn create_video(&self, request: &CreateVideoRequest) -> ClientResult<VideoJob> {
        request.ensure_valid()?;

        let url = format!("{}/api/videos", self.base_url);
        let mut form = Form::new()
            .text("product_name", request.product_name.clone())
            .text(
                "product_description",
                request.product_description.clone().unwrap_or_default(),
            )
            .text("style", request.style.as_str());

        for image in &request.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }

        debug!(
            "Submitting video request for '{}' with {} image(s)",
            request.product_name,
            request.images.len()
        );

        let response = self
            .execute("create_video", self.http.post(&url).multipart(form))
            .await?;
        let job: VideoJob = Self::decode(response).await?;

        info!(video_id = %job.id, status = %job.status, "Video generation request accepted");
        Ok(job)
    }

    /// Fetch the full job resource.
    pub async fn get_video(&self, id: &VideoId) -> ClientResult<VideoJob> {
        let url = self.video_url(id);
        let response = self.execute("get_video", self.http.get(&url)).await?;
        Self::decode(response).await
    }

    /// Fetch the abbreviated job status.
    pub async fn get_status(&self, id: &VideoId) -> ClientResult<VideoStatus> {
        let url = format!("{}/status", self.video_url(id));
        let response = self.execute("get_status", self.http.get(&url)).await?;
        Self::decode(response).await
    }

    /// URL the finished video can be downloaded from.
    pub fn download_url(&self, id: &VideoId) -> String {
        format!("{}/download", self.video_url(id))
    }

    /// URL the finished video can be streamed from.
    ///
    /// The service stores a local file path; only its basename is meaningful
    /// to clients and is resolved against the static `outputs` mount.
    pub fn stream_url(&self, video_path: &str) -> Option<String> {
        let file_name = video_path
            .rsplit(['/', '\\'])
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())?;

        Some(format!(
            "{}/outputs/{}",
            self.base_url,
            urlencoding::encode(file_name)
        ))
    }

    /// Download the finished video to `dest`, returning the number of bytes written.
    ///
    /// The body is streamed to disk; a partially written file is removed on error.
    pub async fn download_video(&self, id: &VideoId, dest: &Path) -> ClientResult<u64> {
        let url = self.download_url(id);

        let response = match self.execute("download_video", self.http.get(&url)).await {
            Err(ClientError::RequestFailed {
                status: 400,
                message,
            }) => return Err(ClientError::NotReady(message)),
            other => other?,
        };

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        match Self::write_body(response, dest).await {
            Ok(written) => {
                info!(video_id = %id, bytes = written, "Downloaded video to {}", dest.display());
                Ok(written)
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(dest).await {
                    debug!("Failed to remove partial download {}: {}", dest.display(), cleanup);
                }
                Err(e)
            }
        }
    }

    async fn write_body(mut response: Response, dest: &Path) -> ClientResult<u64> {
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }

    fn video_url(&self, id: &VideoId) -> String {
        format!(
            "{}/api/videos/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    /// Send a request, record metrics and turn non-success statuses into errors.
    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> ClientResult<Response> {
        let start = Instant::now();
        let result = request.send().await;
        let latency_ms = start.elapsed().as_millis() as f64;

        match result {
            Ok(response) => {
                let status = response.status();
                record_request(operation, status.as_u16(), latency_ms);

                if status.is_success() {
                    Ok(response)
                } else {
                    let body = response.text().await.unwrap_or_default();
                    Err(ClientError::from_http_status(
                        status.as_u16(),
                        ErrorBody::message_from(&body),
                    ))
                }
            }
            Err(e) => {
                record_request(operation, 0, latency_ms);
                if e.is_timeout() {
                    Err(ClientError::Timeout(self.timeout.as_secs()))
                } else {
                    Err(ClientError::Network(e))
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn normalize_base_url(raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ClientError::invalid_request(format!("Invalid base URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::invalid_request(format!(
            "Unsupported URL scheme '{}' in base URL",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}
