mod api;
mod app;
mod application;
mod config;
mod domain;
mod platform;
mod ui;
mod utils;

use iced::{window, Size};

fn main() -> iced::Result {
    utils::init_tracing();

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("Video Downloader")
        .window(window::Settings {
            size: Size::new(480.0, 240.0),
            ..Default::default()
        })
        .run()
}
