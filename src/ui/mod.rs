use iced::{
    widget::{button, column, container, text, text_input},
    Alignment, Element, Length,
};

use crate::domain::DownloadFailure;

/// User-facing wording for each failure kind
pub fn error_text(failure: DownloadFailure) -> &'static str {
    match failure {
        DownloadFailure::FetchFailed => "An error occurred while fetching the video.",
        DownloadFailure::PermissionDenied => "Storage permission denied.",
        DownloadFailure::DownloadFailed => "An error occurred while downloading the video.",
    }
}

/// Main view state
#[derive(Default)]
pub struct DownloadView {
    pub url: String,
    pub error: Option<DownloadFailure>,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.url = url;
            }
            DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let mut content = column![
            text_input("YouTube Video URL", &self.url)
                .on_input(DownloadMessage::UrlChanged)
                .on_submit(DownloadMessage::DownloadPressed)
                .padding(10),
            button("Download Video")
                .on_press(DownloadMessage::DownloadPressed)
                .padding([10, 20]),
        ]
        .spacing(16)
        .align_x(Alignment::Center);

        if let Some(failure) = self.error {
            content = content.push(text(error_text(failure)).size(14).style(text::danger));
        }

        container(content)
            .padding([0, 16])
            .center_y(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text() {
        assert_eq!(
            error_text(DownloadFailure::FetchFailed),
            "An error occurred while fetching the video."
        );
        assert_eq!(
            error_text(DownloadFailure::PermissionDenied),
            "Storage permission denied."
        );
        assert_eq!(
            error_text(DownloadFailure::DownloadFailed),
            "An error occurred while downloading the video."
        );
    }

    #[test]
    fn test_url_changed() {
        let mut view = DownloadView::default();
        view.update(DownloadMessage::UrlChanged("https://youtube.com/watch?v=a".into()));
        assert_eq!(view.url, "https://youtube.com/watch?v=a");

        view.update(DownloadMessage::DownloadPressed);
        assert_eq!(view.url, "https://youtube.com/watch?v=a");
    }
}
