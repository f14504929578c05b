//! Text rendering of jobs and progress.

use std::fmt::Write;

use vgen_models::{JobProgress, Phase, VideoJob, VideoStatus};

/// One progress line, e.g. `[ 55%] Recording voice-over - Generating audio...`.
pub fn progress_line(progress: &JobProgress) -> String {
    let mut line = format!("[{:>3}%] {}", progress.percent, progress.label);
    if let Some(message) = &progress.message {
        let _ = write!(line, " - {}", message);
    }
    line
}

/// One-shot status summary.
pub fn status_line(status: &VideoStatus) -> String {
    let progress = JobProgress::from_status(status);
    let mut line = format!("{} {} {}", status.id, status.status, progress_line(&progress));
    if status.status == Phase::Failed {
        let _ = write!(line, ": {}", status.failure_message());
    }
    line
}

/// Result view for a finished job.
pub fn result_view(job: &VideoJob, stream_url: Option<&str>, download_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Video ready: {} ({})", job.product_name, job.style);

    if let Some(script) = job.script.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "\nScript:\n{}\n", script);
    }

    if let Some(url) = stream_url {
        let _ = writeln!(out, "Stream:   {}", url);
    }
    let _ = write!(out, "Download: {}", download_url);
    out
}
