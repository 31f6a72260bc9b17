//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileApprovalConfig, FileBoundsConfig, FileConfig, FileRoomConfig};
pub use loader::ConfigLoader;
