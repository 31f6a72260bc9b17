//! Infrastructure layer for backlog-poker
//!
//! Adapters behind the application-layer ports: the JSON-file backlog
//! repository, the TOML configuration loader, and the allow-list policy
//! built from configuration.

pub mod config;
pub mod persistence;
pub mod policy;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use persistence::JsonBacklogRepository;
pub use policy::StaticAllowList;
