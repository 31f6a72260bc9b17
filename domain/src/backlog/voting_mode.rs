//! Voting modes for consensus determination
//!
//! The voting mode is fixed when a feature is created and governs how the
//! revealed votes are evaluated.

use serde::{Deserialize, Serialize};

/// Approval rule for a feature's voting round
///
/// - `Unanimity`: all voters must cast the same value (default)
/// - `Average`: the mean of the numeric votes must reach a threshold
/// - `Median`: the median of the numeric votes must reach a threshold
///
/// Serialized with the legacy backlog-file spellings so existing files
/// keep loading.
///
/// # Example
///
/// ```
/// use poker_domain::VotingMode;
///
/// let mode: VotingMode = "unanimite".parse().unwrap();
/// assert_eq!(mode, VotingMode::Unanimity);
///
/// let mode: VotingMode = "average".parse().unwrap();
/// assert_eq!(mode, VotingMode::Average);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VotingMode {
    /// Every voter cast the same value
    #[default]
    #[serde(rename = "unanimite")]
    Unanimity,

    /// Mean of the numeric votes reaches the configured threshold
    #[serde(rename = "moyenne")]
    Average,

    /// Median of the numeric votes reaches the configured threshold
    #[serde(rename = "mediane")]
    Median,
}

impl VotingMode {
    /// The wire spelling used in the persisted backlog file
    pub fn wire_name(&self) -> &'static str {
        match self {
            VotingMode::Unanimity => "unanimite",
            VotingMode::Average => "moyenne",
            VotingMode::Median => "mediane",
        }
    }

    /// Whether this mode needs votes parsed as numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, VotingMode::Average | VotingMode::Median)
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            VotingMode::Unanimity => "unanimity (all votes identical)",
            VotingMode::Average => "average (mean of votes meets threshold)",
            VotingMode::Median => "median (median of votes meets threshold)",
        }
    }
}

impl std::fmt::Display for VotingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for VotingMode {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unanimite" | "unanimity" | "unanimous" => Ok(VotingMode::Unanimity),
            "moyenne" | "average" | "mean" => Ok(VotingMode::Average),
            "mediane" | "median" => Ok(VotingMode::Median),
            other => Err(crate::core::error::DomainError::UnknownVotingMode(
                other.to_string(),
            )),
        }
    }
}
