//! Participant domain types

pub mod entities;
pub mod role;

pub use entities::Participant;
pub use role::Role;
