use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::domain::DownloadFailure;

/// Receives the error state of a download attempt.
///
/// `None` clears the displayed error. Writes from concurrent attempts are not
/// ordered against each other; the last one delivered wins.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: Option<DownloadFailure>);
}

/// Forwards every report into a channel the UI drains.
///
/// The receiving stream ends once the attempt and its background download
/// have both dropped their handle.
pub struct ChannelErrorSink {
    tx: UnboundedSender<Option<DownloadFailure>>,
}

impl ChannelErrorSink {
    pub fn channel() -> (Arc<Self>, UnboundedReceiver<Option<DownloadFailure>>) {
        let (tx, rx) = mpsc::unbounded();
        (Arc::new(Self { tx }), rx)
    }
}

impl ErrorSink for ChannelErrorSink {
    fn report(&self, error: Option<DownloadFailure>) {
        if self.tx.unbounded_send(error).is_err() {
            debug!(?error, "Error report dropped, receiver is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_channel_delivers_in_order_and_closes() {
        let (sink, rx) = ChannelErrorSink::channel();

        sink.report(None);
        sink.report(Some(DownloadFailure::DownloadFailed));
        drop(sink);

        let received: Vec<_> = rx.collect().await;
        assert_eq!(received, vec![None, Some(DownloadFailure::DownloadFailed)]);
    }

    #[test]
    fn test_report_after_receiver_dropped() {
        let (sink, rx) = ChannelErrorSink::channel();
        drop(rx);
        sink.report(Some(DownloadFailure::FetchFailed));
    }
}
