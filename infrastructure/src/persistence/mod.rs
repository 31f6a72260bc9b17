//! Persistence adapters

pub mod json_backlog;

pub use json_backlog::JsonBacklogRepository;
