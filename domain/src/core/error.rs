//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown voting mode: {0}")]
    UnknownVotingMode(String),

    #[error("vote from '{pseudo}' cannot be scored numerically: '{value}'")]
    InvalidVoteValue { pseudo: String, value: String },

    #[error("pseudo cannot be empty")]
    EmptyPseudo,
}

impl DomainError {
    /// Check if this error means a cast vote could not be parsed as a number
    pub fn is_invalid_vote(&self) -> bool {
        matches!(self, DomainError::InvalidVoteValue { .. })
    }
}
