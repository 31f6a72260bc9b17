//! Backlog domain types
//!
//! A backlog is an ordered collection of features, sorted by ascending
//! priority. These types only describe the records; the ordered collection
//! itself lives in the application layer.

pub mod entities;
pub mod validation;
pub mod voting_mode;

pub use entities::{Feature, FeatureDraft, FeatureUpdate};
pub use validation::{FeatureBounds, ValidationIssue};
pub use voting_mode::VotingMode;
