pub mod error;
pub mod model;

pub use error::DownloadFailure;
pub use model::{DownloadJob, DownloadPhase};
