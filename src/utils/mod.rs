use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "video_url_downloader=info";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Text between the first and second `v=` of the URL, if any
pub fn extract_video_id(url: &str) -> Option<&str> {
    url.split("v=").nth(1)
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=ABC123"),
            Some("ABC123")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=ABC123&t=10"),
            Some("ABC123&t=10")
        );
        assert_eq!(extract_video_id("https://youtu.be/ABC123"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.mp4"), "test_file.mp4");
        assert_eq!(sanitize_filename("../video.mp4"), ".._video.mp4");
        assert_eq!(sanitize_filename("normal-name.mp4"), "normal-name.mp4");
    }
}
