pub mod download;
pub mod permission;

pub use download::{DownloadDispatcher, HttpDownloadDispatcher};
pub use permission::{
    DialogPermissionProvider, PermissionGate, PermissionProvider, UnrestrictedStorage,
};
