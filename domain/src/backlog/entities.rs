//! Backlog domain entities

use super::voting_mode::VotingMode;
use serde::{Deserialize, Serialize};

/// Default workflow label for freshly created features
pub const DEFAULT_STATUS: &str = "to do";

/// A backlog work item being estimated (Entity)
///
/// Serde renames map to the legacy backlog-file field names so files written
/// by earlier versions of the tool keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique positive identifier, assigned by the backlog store
    pub id: u32,
    /// Display name (no uniqueness constraint)
    #[serde(rename = "nom")]
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Lower is more urgent; determines backlog order
    #[serde(rename = "priorite")]
    pub priority: i64,
    /// Estimated difficulty; the quantity the room votes on
    #[serde(rename = "difficulte", default)]
    pub difficulty: Option<i64>,
    /// Free-form workflow label
    #[serde(rename = "statut", default = "default_status")]
    pub status: String,
    /// Approval rule, fixed at creation
    #[serde(rename = "mode_de_vote", default)]
    pub voting_mode: VotingMode,
    /// Pseudos expected to vote on this feature
    #[serde(default)]
    pub participants: Vec<String>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl Feature {
    /// Check whether a pseudo is among the expected participants
    /// (case-insensitive)
    pub fn expects(&self, pseudo: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.eq_ignore_ascii_case(pseudo))
    }
}

/// Fields needed to create a feature; the id is assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDraft {
    pub name: String,
    pub description: String,
    pub priority: i64,
    pub difficulty: Option<i64>,
    pub status: String,
    pub voting_mode: VotingMode,
    pub participants: Vec<String>,
}

impl FeatureDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            difficulty: None,
            status: DEFAULT_STATUS.to_string(),
            voting_mode: VotingMode::default(),
            participants: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_voting_mode(mut self, mode: VotingMode) -> Self {
        self.voting_mode = mode;
        self
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    /// Materialize the draft into a feature with the given id
    pub fn into_feature(self, id: u32) -> Feature {
        Feature {
            id,
            name: self.name,
            description: self.description,
            priority: self.priority,
            difficulty: self.difficulty,
            status: self.status,
            voting_mode: self.voting_mode,
            participants: self.participants,
        }
    }
}

/// Partial update for an existing feature
///
/// Every field is optional; only present fields overwrite the stored
/// record. The voting mode is deliberately absent: it is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub difficulty: Option<i64>,
    pub status: Option<String>,
    pub participants: Option<Vec<String>>,
}

impl FeatureUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into an existing feature
    pub fn apply_to(&self, feature: &mut Feature) {
        if let Some(name) = &self.name {
            feature.name = name.clone();
        }
        if let Some(description) = &self.description {
            feature.description = description.clone();
        }
        if let Some(priority) = self.priority {
            feature.priority = priority;
        }
        if let Some(difficulty) = self.difficulty {
            feature.difficulty = Some(difficulty);
        }
        if let Some(status) = &self.status {
            feature.status = status.clone();
        }
        if let Some(participants) = &self.participants {
            feature.participants = participants.clone();
        }
    }
}
