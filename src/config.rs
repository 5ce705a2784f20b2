use std::path::PathBuf;

use crate::api::ApiConfig;
use crate::utils::sanitize_filename;

pub const DEFAULT_FILE_NAME: &str = "video_hello.mp4";

const ENV_SERVER_URL: &str = "VIDEO_DL_SERVER_URL";
const ENV_DOWNLOAD_DIR: &str = "VIDEO_DL_DOWNLOAD_DIR";
const ENV_FILE_NAME: &str = "VIDEO_DL_FILE_NAME";
const ENV_PERMISSION_PROMPT: &str = "VIDEO_DL_PERMISSION_PROMPT";

/// How storage permission is obtained before a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionMode {
    /// No permission model, every request is granted.
    #[default]
    Unrestricted,
    /// Ask the user through a native dialog.
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// `None` means the platform downloads directory.
    pub downloads_dir: Option<PathBuf>,
    pub file_name: String,
    pub permission_mode: PermissionMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            downloads_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            permission_mode: PermissionMode::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for the known keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = value(ENV_SERVER_URL) {
            config.api.base_url = base_url;
        }
        if let Some(dir) = value(ENV_DOWNLOAD_DIR) {
            config.downloads_dir = Some(PathBuf::from(dir));
        }
        if let Some(name) = value(ENV_FILE_NAME) {
            let name = sanitize_filename(&name);
            if !name.is_empty() {
                config.file_name = name;
            }
        }
        if let Some(prompt) = value(ENV_PERMISSION_PROMPT) {
            if matches!(prompt.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config.permission_mode = PermissionMode::Prompt;
            }
        }

        config
    }

    pub fn resolve_downloads_dir(&self) -> PathBuf {
        self.downloads_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Fixed destination for every download
    pub fn destination(&self) -> PathBuf {
        self.resolve_downloads_dir().join(&self.file_name)
    }
}
