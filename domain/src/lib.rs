//! Domain layer for backlog-poker
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Backlog
//!
//! An ordered collection of [`Feature`]s, sorted by ascending priority.
//! The feature at the front of the backlog is the one the room votes on.
//!
//! ## Round
//!
//! One voting cycle against the active feature: everyone votes
//! simultaneously, votes are revealed, and the feature's
//! [`VotingMode`] decides whether consensus was reached.

pub mod backlog;
pub mod core;
pub mod participant;
pub mod vote;

// Re-export commonly used types
pub use backlog::{
    entities::{Feature, FeatureDraft, FeatureUpdate},
    validation::{FeatureBounds, ValidationIssue},
    voting_mode::VotingMode,
};
pub use core::error::DomainError;
pub use participant::{
    entities::Participant,
    role::Role,
};
pub use vote::approval::{ApprovalThresholds, evaluate};
