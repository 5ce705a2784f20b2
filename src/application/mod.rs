pub mod download_orchestrator;
pub mod error_sink;

pub use download_orchestrator::DownloadOrchestrator;
pub use error_sink::ChannelErrorSink;
