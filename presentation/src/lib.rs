//! Presentation layer for backlog-poker
//!
//! This crate contains the CLI definition, the interactive room REPL,
//! and console output formatting.

pub mod cli;
pub mod output;
pub mod room;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use room::RoomRepl;
