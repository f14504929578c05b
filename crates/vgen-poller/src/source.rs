//! Where the poller gets job snapshots from.

use std::future::Future;

use vgen_client::{ClientResult, VideoClient};
use vgen_models::{VideoId, VideoStatus};

/// A source of job status snapshots.
pub trait StatusSource: Send + Sync {
    /// Fetch the current status snapshot of a job.
    fn fetch_status(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = ClientResult<VideoStatus>> + Send;
}

impl StatusSource for VideoClient {
    fn fetch_status(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = ClientResult<VideoStatus>> + Send {
        self.get_status(video_id)
    }
}
