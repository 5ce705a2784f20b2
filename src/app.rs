use std::sync::Arc;

use futures::StreamExt;
use iced::Task;
use tracing::debug;

use crate::api::ApiClient;
use crate::application::{ChannelErrorSink, DownloadOrchestrator};
use crate::config::{AppConfig, PermissionMode};
use crate::domain::{DownloadFailure, DownloadPhase};
use crate::platform::{
    DialogPermissionProvider, HttpDownloadDispatcher, PermissionGate, PermissionProvider,
    UnrestrictedStorage,
};
use crate::ui::{DownloadMessage, DownloadView};

pub struct DownloadApp {
    view: DownloadView,
    orchestrator: DownloadOrchestrator,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new(AppConfig::from_env())
    }
}

impl DownloadApp {
    pub fn new(config: AppConfig) -> Self {
        let provider: Arc<dyn PermissionProvider> = match config.permission_mode {
            PermissionMode::Unrestricted => Arc::new(UnrestrictedStorage),
            PermissionMode::Prompt => Arc::new(DialogPermissionProvider),
        };

        let orchestrator = DownloadOrchestrator::new(
            ApiClient::new(config.api.clone()),
            PermissionGate::new(provider),
            Arc::new(HttpDownloadDispatcher::new()),
            config.destination(),
        );

        Self {
            view: DownloadView::default(),
            orchestrator,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Final phase of an attempt, including its background download
    AttemptSettled(DownloadPhase),
    /// Error sink write from any attempt; the latest one is shown
    ErrorReported(Option<DownloadFailure>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            if let DownloadMessage::DownloadPressed = ui_msg {
                let (sink, reports) = ChannelErrorSink::channel();
                let orchestrator = app.orchestrator.clone();
                let url = app.view.url.clone();

                // The attempt and its sink reports are separate tasks so a
                // background download can still report after the attempt returns.
                return Task::batch([
                    Task::perform(
                        async move {
                            let attempt = orchestrator.download_video(&url, sink).await;
                            debug!(phase = ?attempt.phase(), "Download attempt returned");
                            attempt.settle().await
                        },
                        Message::AttemptSettled,
                    ),
                    Task::stream(reports.map(Message::ErrorReported)),
                ]);
            }
        }
        Message::AttemptSettled(phase) => {
            debug!(?phase, "Download attempt settled");
        }
        Message::ErrorReported(error) => {
            app.view.error = error;
        }
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
