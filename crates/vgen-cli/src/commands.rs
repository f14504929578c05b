//! Subcommand implementations.
//!
//! Each command returns `Ok(true)` on success and `Ok(false)` when it ran
//! but the outcome should exit non-zero (failed job, unhealthy service).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use vgen_client::{ClientError, CreateVideoRequest, ImageUpload, VideoClient, MAX_IMAGES};
use vgen_models::{JobProgress, Phase, VideoId, VideoJob, VideoStatus};
use vgen_poller::{JobPoller, PollObserver, PollOutcome, PollerConfig};

use crate::cli::CreateArgs;
use crate::render::{progress_line, result_view, status_line};

/// Prints each distinct progress line.
struct ProgressPrinter {
    last: Option<JobProgress>,
}

impl ProgressPrinter {
    fn starting_at(progress: JobProgress) -> Self {
        println!("{}", progress_line(&progress));
        Self {
            last: Some(progress),
        }
    }
}

impl PollObserver for ProgressPrinter {
    fn on_progress(&mut self, progress: &JobProgress) {
        if self.last.as_ref() != Some(progress) {
            println!("{}", progress_line(progress));
            self.last = Some(progress.clone());
        }
    }

    fn on_success(&mut self, _status: &VideoStatus) {
        println!("{}", progress_line(&JobProgress::for_phase(Phase::Done)));
    }
}

/// Submit a job, then optionally follow it.
pub async fn create(client: &VideoClient, poller: PollerConfig, args: CreateArgs) -> Result<bool> {
    let mut paths = args.images;
    if paths.len() > MAX_IMAGES {
        warn!(
            given = paths.len(),
            kept = MAX_IMAGES,
            "Too many images, keeping the first {}",
            MAX_IMAGES
        );
        paths.truncate(MAX_IMAGES);
    }

    let mut request = CreateVideoRequest::new(args.name, args.style);
    if let Some(description) = args.description {
        request = request.with_description(description);
    }
    for path in &paths {
        let image = ImageUpload::from_path(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        request = request.with_image(image);
    }

    let job = client
        .create_video(&request)
        .await
        .context("Failed to create video")?;

    info!(video_id = %job.id, "Video job created");
    println!("{}", job.id);

    if args.no_wait {
        return Ok(true);
    }

    follow(client, poller, job, args.download.as_deref()).await
}

/// Follow an existing job.
pub async fn watch(
    client: &VideoClient,
    poller: PollerConfig,
    id: &VideoId,
    download_to: Option<&Path>,
) -> Result<bool> {
    let job = client
        .get_video(id)
        .await
        .with_context(|| format!("Failed to load video {}", id))?;

    follow(client, poller, job, download_to).await
}

async fn follow(
    client: &VideoClient,
    poller: PollerConfig,
    job: VideoJob,
    download_to: Option<&Path>,
) -> Result<bool> {
    match job.status {
        Phase::Done => return finish(client, job, download_to).await,
        Phase::Failed => {
            eprintln!("Video generation failed: {}", job.failure_message());
            return Ok(false);
        }
        _ => {}
    }

    let printer = ProgressPrinter::starting_at(JobProgress::from_status(&job.to_status()));
    let handle = JobPoller::new(client.clone(), poller).spawn(job.id.clone(), printer);
    info!(video_id = %handle.video_id(), "Watching video");

    let outcome = tokio::select! {
        outcome = handle.wait() => outcome,
        _ = tokio::signal::ctrl_c() => {
            info!(video_id = %job.id, "Interrupted, stopped watching");
            PollOutcome::Cancelled
        }
    };

    match outcome {
        PollOutcome::Completed(status) => {
            let finished = match client.get_video(&job.id).await {
                Ok(finished) => finished,
                Err(e) => {
                    warn!(video_id = %job.id, error = %e, "Failed to reload finished video");
                    apply_final_status(job, &status)
                }
            };
            finish(client, finished, download_to).await
        }
        PollOutcome::Failed(message) => {
            eprintln!("Video generation failed: {}", message);
            Ok(false)
        }
        PollOutcome::Cancelled => {
            eprintln!("Stopped watching {}; resume with `vgen watch {}`", job.id, job.id);
            Ok(false)
        }
    }
}

/// Fold the final status snapshot into an earlier copy of the job.
fn apply_final_status(mut job: VideoJob, status: &VideoStatus) -> VideoJob {
    job.status = status.status;
    if status.video_url.is_some() {
        job.video_url = status.video_url.clone();
    }
    if status.error_message.is_some() {
        job.error_message = status.error_message.clone();
    }
    job
}

async fn finish(client: &VideoClient, job: VideoJob, download_to: Option<&Path>) -> Result<bool> {
    let stream_url = job
        .video_url
        .as_deref()
        .and_then(|path| client.stream_url(path));
    println!(
        "{}",
        result_view(&job, stream_url.as_deref(), &client.download_url(&job.id))
    );

    if let Some(dest) = download_to {
        save(client, &job.id, dest).await?;
    }
    Ok(true)
}

/// One-shot status.
pub async fn status(client: &VideoClient, id: &VideoId) -> Result<bool> {
    let status = client
        .get_status(id)
        .await
        .with_context(|| format!("Failed to get status of {}", id))?;

    println!("{}", status_line(&status));
    Ok(status.status != Phase::Failed)
}

/// Full job as pretty JSON.
pub async fn show(client: &VideoClient, id: &VideoId) -> Result<bool> {
    let job = client
        .get_video(id)
        .await
        .with_context(|| format!("Failed to load video {}", id))?;

    println!("{}", serde_json::to_string_pretty(&job)?);
    Ok(true)
}

/// Download a finished video.
pub async fn download(client: &VideoClient, id: &VideoId, output: Option<PathBuf>) -> Result<bool> {
    let dest = match output {
        Some(path) => path,
        None => {
            let job = client
                .get_video(id)
                .await
                .with_context(|| format!("Failed to load video {}", id))?;
            PathBuf::from(job.suggested_file_name())
        }
    };

    save(client, id, &dest).await?;
    Ok(true)
}

async fn save(client: &VideoClient, id: &VideoId, dest: &Path) -> Result<()> {
    match client.download_video(id, dest).await {
        Ok(bytes) => {
            println!("Saved {} ({} bytes)", dest.display(), bytes);
            Ok(())
        }
        Err(ClientError::NotReady(message)) => {
            anyhow::bail!("Video {} is not ready for download: {}", id, message)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to download {}", id)),
    }
}

/// Service health.
pub async fn health(client: &VideoClient) -> Result<bool> {
    let healthy = client.health_check().await?;
    if healthy {
        println!("{} is healthy", client.base_url());
    } else {
        println!("{} is not healthy", client.base_url());
    }
    Ok(healthy)
}
