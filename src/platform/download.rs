use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::domain::DownloadJob;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid source URL {url:?}: {reason}")]
    InvalidSource { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Media server returned status {0}")]
    Status(StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs a download job to completion.
///
/// Callers that want fire-and-forget semantics spawn the returned future.
#[async_trait]
pub trait DownloadDispatcher: Send + Sync {
    async fn dispatch(&self, job: &DownloadJob) -> Result<PathBuf, DispatchError>;
}

/// Streams the source over HTTP, then moves the finished file onto the destination.
#[derive(Clone, Default)]
pub struct HttpDownloadDispatcher {
    client: Client,
}

impl HttpDownloadDispatcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl DownloadDispatcher for HttpDownloadDispatcher {
    async fn dispatch(&self, job: &DownloadJob) -> Result<PathBuf, DispatchError> {
        let source = Url::parse(&job.source_url).map_err(|e| DispatchError::InvalidSource {
            url: job.source_url.clone(),
            reason: e.to_string(),
        })?;

        if job.use_system_download_manager {
            debug!("No system download manager on this platform, downloading in-process");
        }

        let response = self.client.get(source).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status));
        }

        let dir = match job.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir).await?;

        // Partial data goes to a sibling temp file that is removed on drop;
        // the destination only ever sees a complete download.
        let partial = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(".download-")
                .suffix(".part")
                .tempfile_in(dir)
        })
        .await
        .map_err(std::io::Error::other)??;
        let (std_file, partial_path) = partial.into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        let total = response.content_length();
        let mut stream = response.bytes_stream();
        let mut progress = ProgressNotifier::new(job, total);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            progress.advance(chunk.len() as u64);
        }

        file.sync_all().await?;
        drop(file);

        let destination = job.destination.clone();
        tokio::task::spawn_blocking(move || partial_path.persist(&destination))
            .await
            .map_err(std::io::Error::other)?
            .map_err(|e| DispatchError::Io(e.error))?;

        Ok(job.destination.clone())
    }
}

/// Reports progress in 10% steps when the job asks for a notification.
struct ProgressNotifier<'a> {
    job: &'a DownloadJob,
    total: Option<u64>,
    downloaded: u64,
    last_step: u64,
}

impl<'a> ProgressNotifier<'a> {
    fn new(job: &'a DownloadJob, total: Option<u64>) -> Self {
        if job.show_notification {
            info!(destination = %job.destination.display(), "{}", job.description);
        }
        Self {
            job,
            total,
            downloaded: 0,
            last_step: 0,
        }
    }

    fn advance(&mut self, bytes: u64) {
        self.downloaded += bytes;
        if !self.job.show_notification {
            return;
        }

        match self.total {
            Some(total) if total > 0 => {
                let step = (self.downloaded * 10 / total).min(10);
                if step > self.last_step {
                    self.last_step = step;
                    info!(percent = step * 10, "{}", self.job.description);
                }
            }
            _ => debug!(downloaded = self.downloaded, "{}", self.job.description),
        }
    }
}
