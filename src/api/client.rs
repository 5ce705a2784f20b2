use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::models::{ApiConfig, ConvertRequest, ConvertResponse};

const DOWNLOAD_PATH: &str = "download/";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Conversion service returned status {0}")]
    Status(StatusCode),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// `<base_url>/download/`, keeping any path prefix on the base.
    fn endpoint(&self) -> Result<Url> {
        let mut base = self.config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(DOWNLOAD_PATH)?)
    }

    /// Submit a video URL for conversion.
    /// Returns the parsed body on a 2xx response.
    pub async fn request_download_url(&self, video_url: &str) -> Result<ConvertResponse> {
        let endpoint = self.endpoint()?;
        debug!(%endpoint, "Requesting conversion");

        let response = self
            .client
            .post(endpoint)
            .json(&ConvertRequest { url: video_url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(base_url: String) -> ApiClient {
        ApiClient::new(ApiConfig { base_url })
    }

    #[test]
    fn test_endpoint_join() {
        let client = client_for("https://example.com".to_string());
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://example.com/download/"
        );

        let client = client_for("https://example.com/api/".to_string());
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://example.com/api/download/"
        );

        let client = client_for("not a url".to_string());
        assert!(matches!(
            client.endpoint(),
            Err(ApiError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn test_request_download_url_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/download/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(
                json!({ "url": "https://youtube.com/watch?v=ABC123" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"downloadUrl":"https://cdn/x.mp4"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let response = client
            .request_download_url("https://youtube.com/watch?v=ABC123")
            .await
            .unwrap();

        assert_eq!(response.download_url.as_deref(), Some("https://cdn/x.mp4"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_download_url_is_not_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/download/")
            .with_status(200)
            .with_body(r#"{"title":"something"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/download/")
            .with_status(200)
            .with_body(r#"{"downloadUrl":null}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let response = client.request_download_url("x").await.unwrap();
        assert_eq!(response.download_url, None);

        let client = client_for(format!("{}/api", server.url()));
        let response = client.request_download_url("x").await.unwrap();
        assert_eq!(response.download_url, None);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/download/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(server.url());
        let err = client.request_download_url("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/download/")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;
        server
            .mock("POST", "/typed/download/")
            .with_status(200)
            .with_body(r#"{"downloadUrl":42}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let err = client.request_download_url("x").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));

        let client = client_for(format!("{}/typed", server.url()));
        let err = client.request_download_url("x").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = client_for("http://127.0.0.1:1".to_string());
        let err = client.request_download_url("x").await.unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
