use thiserror::Error;

/// Terminal failure of a single download attempt.
///
/// The display text is diagnostic; the user-facing wording lives in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DownloadFailure {
    #[error("conversion request failed")]
    FetchFailed,

    #[error("storage permission was not granted")]
    PermissionDenied,

    #[error("download job failed")]
    DownloadFailed,
}
