use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    api::ApiClient,
    domain::{DownloadFailure, DownloadJob, DownloadPhase},
    platform::{DownloadDispatcher, PermissionGate},
    utils::extract_video_id,
};

use super::error_sink::ErrorSink;

/// Outcome of the synchronous part of an attempt.
///
/// When a download was dispatched, `phase` is `Downloading` and the job keeps
/// running whether or not the attempt is awaited further.
pub struct Attempt {
    phase: DownloadPhase,
    download: Option<JoinHandle<DownloadPhase>>,
}

impl Attempt {
    fn finished(phase: DownloadPhase) -> Self {
        Self {
            phase,
            download: None,
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    /// Waits for the background download, if any, and returns the final phase.
    pub async fn settle(self) -> DownloadPhase {
        let phase = match self.download {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                warn!(error = %e, "Download task did not complete");
                DownloadPhase::DownloadFailed
            }),
            None => self.phase,
        };
        debug_assert!(phase.is_terminal());
        phase
    }
}

#[derive(Clone)]
pub struct DownloadOrchestrator {
    api_client: ApiClient,
    permission_gate: PermissionGate,
    dispatcher: Arc<dyn DownloadDispatcher>,
    destination: PathBuf,
}

impl DownloadOrchestrator {
    pub fn new(
        api_client: ApiClient,
        permission_gate: PermissionGate,
        dispatcher: Arc<dyn DownloadDispatcher>,
        destination: PathBuf,
    ) -> Self {
        Self {
            api_client,
            permission_gate,
            dispatcher,
            destination,
        }
    }

    /// Convert `url`, ask for storage access and dispatch the download.
    ///
    /// Every outcome is written to `sink`; nothing is returned as an error.
    /// A dispatched download is not awaited: its failure reaches the sink
    /// later, possibly after another attempt has started.
    pub async fn download_video(&self, url: &str, sink: Arc<dyn ErrorSink>) -> Attempt {
        sink.report(None);
        debug!(phase = ?DownloadPhase::Idle, "Previous error cleared");

        // Only logged; the destination name is fixed.
        let video_id = extract_video_id(url);
        debug!(url, ?video_id, phase = ?DownloadPhase::Requesting, "Submitting video URL");

        let response = match self.api_client.request_download_url(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to fetch the video");
                sink.report(Some(DownloadFailure::FetchFailed));
                return Attempt::finished(DownloadPhase::RequestFailed);
            }
        };

        let download_url = response.download_url.unwrap_or_default();
        debug!(%download_url, phase = ?DownloadPhase::Fetched, "Conversion finished");

        debug!(phase = ?DownloadPhase::PermissionCheck, "Requesting storage permission");
        if !self.permission_gate.acquire().await {
            sink.report(Some(DownloadFailure::PermissionDenied));
            return Attempt::finished(DownloadPhase::PermissionDenied);
        }

        let job = DownloadJob::new(download_url, self.destination.clone());
        let dispatcher = Arc::clone(&self.dispatcher);
        let handle = tokio::spawn(async move {
            match dispatcher.dispatch(&job).await {
                Ok(path) => {
                    info!(path = %path.display(), "Video downloaded successfully");
                    DownloadPhase::Done
                }
                Err(e) => {
                    warn!(error = %e, source = %job.source_url, "Failed to download the video");
                    sink.report(Some(DownloadFailure::DownloadFailed));
                    DownloadPhase::DownloadFailed
                }
            }
        });

        Attempt {
            phase: DownloadPhase::Downloading,
            download: Some(handle),
        }
    }
}
