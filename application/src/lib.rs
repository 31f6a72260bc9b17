//! Application layer for backlog-poker
//!
//! This crate contains the two stateful services of the system and the port
//! definitions their adapters implement. It depends only on the domain layer.
//!
//! - [`BacklogStore`] — the durable, priority-ordered feature collection
//! - [`SessionCoordinator`] — the roster and the single global voting round
//!
//! Neither service carries its own locking: every operation is a fast,
//! synchronous state transition, and the hosting runtime serializes
//! mutating calls (a single-threaded loop or an explicit guard).

pub mod backlog_store;
pub mod config;
pub mod coordinator;
pub mod ports;

// Re-export commonly used types
pub use backlog_store::{BacklogError, BacklogStore};
pub use config::RoomSettings;
pub use coordinator::{RoundState, SessionCoordinator, SessionError};
pub use ports::{
    access_policy::{AccessPolicy, OpenAccess},
    backlog_repository::{BacklogRepository, RepositoryError},
};
