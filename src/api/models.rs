use serde::{Deserialize, Serialize};

/// Body sent to the /download/ endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ConvertRequest<'a> {
    pub url: &'a str,
}

/// Response from the /download/ endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertResponse {
    // Absent or null is not rejected here; the download step fails on it instead.
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://yourtube-dl-server.herokuapp.com".to_string(),
        }
    }
}
