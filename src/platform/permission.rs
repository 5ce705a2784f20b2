//! Storage permission gate.
//!
//! Platforms with a runtime permission model are reached through a
//! [`PermissionProvider`]; [`PermissionGate`] collapses every outcome other
//! than an explicit grant into a denial.

use std::sync::Arc;

use async_trait::async_trait;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use thiserror::Error;
use tracing::{debug, warn};

pub const PERMISSION_TITLE: &str = "Storage Permission";
pub const PERMISSION_MESSAGE: &str = "App needs access to your storage to download the video.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("platform permission request failed: {0}")]
    Platform(String),
}

/// Text shown alongside the permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
}

impl Default for PermissionRationale {
    fn default() -> Self {
        Self {
            title: PERMISSION_TITLE.to_string(),
            message: PERMISSION_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn request_storage_permission(
        &self,
        rationale: &PermissionRationale,
    ) -> Result<PermissionOutcome, PermissionError>;
}

/// Platforms without a permission model: every request is granted.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrestrictedStorage;

#[async_trait]
impl PermissionProvider for UnrestrictedStorage {
    async fn request_storage_permission(
        &self,
        _rationale: &PermissionRationale,
    ) -> Result<PermissionOutcome, PermissionError> {
        Ok(PermissionOutcome::Granted)
    }
}

/// Asks the user with a native OK/Cancel dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogPermissionProvider;

/// X11/Wayland dialogs need a display server to attach to.
fn display_available(lookup: impl Fn(&str) -> Option<String>) -> bool {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .into_iter()
        .any(|key| lookup(key).is_some_and(|v| !v.is_empty()))
}

#[async_trait]
impl PermissionProvider for DialogPermissionProvider {
    async fn request_storage_permission(
        &self,
        rationale: &PermissionRationale,
    ) -> Result<PermissionOutcome, PermissionError> {
        if !display_available(|key| std::env::var(key).ok()) {
            return Err(PermissionError::Platform(
                "no display available for the permission dialog".to_string(),
            ));
        }

        let answer = AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&rationale.title)
            .set_description(&rationale.message)
            .set_buttons(MessageButtons::OkCancel)
            .show()
            .await;

        Ok(match answer {
            MessageDialogResult::Ok | MessageDialogResult::Yes => PermissionOutcome::Granted,
            _ => PermissionOutcome::Denied,
        })
    }
}

#[derive(Clone)]
pub struct PermissionGate {
    provider: Arc<dyn PermissionProvider>,
    rationale: PermissionRationale,
}

impl PermissionGate {
    pub fn new(provider: Arc<dyn PermissionProvider>) -> Self {
        Self {
            provider,
            rationale: PermissionRationale::default(),
        }
    }

    /// Requests storage access. Nothing is cached between calls.
    pub async fn acquire(&self) -> bool {
        match self
            .provider
            .request_storage_permission(&self.rationale)
            .await
        {
            Ok(outcome) => {
                debug!(?outcome, "Storage permission answered");
                outcome == PermissionOutcome::Granted
            }
            Err(e) => {
                warn!(error = %e, "Storage permission request failed");
                false
            }
        }
    }
}
