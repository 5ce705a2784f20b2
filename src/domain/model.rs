use std::path::PathBuf;

pub const DOWNLOAD_DESCRIPTION: &str = "Downloading video...";

/// Descriptor handed to a download dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub source_url: String,
    pub destination: PathBuf,
    pub show_notification: bool,
    pub use_system_download_manager: bool,
    pub description: String,
}

impl DownloadJob {
    pub fn new(source_url: impl Into<String>, destination: PathBuf) -> Self {
        Self {
            source_url: source_url.into(),
            destination,
            show_notification: true,
            use_system_download_manager: true,
            description: DOWNLOAD_DESCRIPTION.to_string(),
        }
    }
}

/// Per-attempt lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Requesting,
    Fetched,
    PermissionCheck,
    Downloading,
    Done,
    RequestFailed,
    PermissionDenied,
    DownloadFailed,
}

impl DownloadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DownloadPhase::Done
                | DownloadPhase::RequestFailed
                | DownloadPhase::PermissionDenied
                | DownloadPhase::DownloadFailed
        )
    }
}
