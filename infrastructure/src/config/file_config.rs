//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Example configuration:
//!
//! ```toml
//! [bounds]
//! priority_min = 1
//! priority_max = 10
//! difficulty_min = 1
//! difficulty_max = 100
//!
//! [approval]
//! average_threshold = 5.0
//! median_threshold = 5.0
//!
//! [room]
//! allow_list = ["po", "sm", "lina", "hugo"]
//! deck = ["0", "1", "2", "3", "5", "8", "13", "20", "40", "100"]
//! backlog_file = "data/backlog.json"
//! ```

use poker_application::RoomSettings;
use poker_domain::{ApprovalThresholds, FeatureBounds, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Priority and difficulty bounds
    pub bounds: FileBoundsConfig,
    /// Approval thresholds for the numeric voting modes
    pub approval: FileApprovalConfig,
    /// Room settings: allow-list, card deck, backlog file location
    pub room: FileRoomConfig,
}

/// `[bounds]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBoundsConfig {
    pub priority_min: i64,
    pub priority_max: i64,
    pub difficulty_min: i64,
    pub difficulty_max: i64,
}

impl Default for FileBoundsConfig {
    fn default() -> Self {
        let bounds = FeatureBounds::default();
        Self {
            priority_min: bounds.priority_min,
            priority_max: bounds.priority_max,
            difficulty_min: bounds.difficulty_min,
            difficulty_max: bounds.difficulty_max,
        }
    }
}

/// `[approval]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApprovalConfig {
    pub average_threshold: f64,
    pub median_threshold: f64,
}

impl Default for FileApprovalConfig {
    fn default() -> Self {
        let thresholds = ApprovalThresholds::default();
        Self {
            average_threshold: thresholds.average,
            median_threshold: thresholds.median,
        }
    }
}

/// `[room]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoomConfig {
    /// Static set of always-admitted pseudos
    pub allow_list: Vec<String>,
    /// Card values offered to voters
    pub deck: Vec<String>,
    /// Location of the persisted backlog
    pub backlog_file: PathBuf,
}

impl Default for FileRoomConfig {
    fn default() -> Self {
        let settings = RoomSettings::default();
        Self {
            allow_list: settings.allow_list,
            deck: settings.deck,
            backlog_file: PathBuf::from("data/backlog.json"),
        }
    }
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    /// Issues are reported, not fixed: the caller decides whether to
    /// proceed with the values as given.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.bounds.priority_min > self.bounds.priority_max {
            issues.push(ValidationIssue::new(
                "bounds.priority",
                format!(
                    "min {} exceeds max {}",
                    self.bounds.priority_min, self.bounds.priority_max
                ),
            ));
        }
        if self.bounds.difficulty_min > self.bounds.difficulty_max {
            issues.push(ValidationIssue::new(
                "bounds.difficulty",
                format!(
                    "min {} exceeds max {}",
                    self.bounds.difficulty_min, self.bounds.difficulty_max
                ),
            ));
        }
        if self.room.deck.is_empty() {
            issues.push(ValidationIssue::new("room.deck", "deck cannot be empty"));
        }
        if self.room.deck.iter().any(|c| c.trim().is_empty()) {
            issues.push(ValidationIssue::new(
                "room.deck",
                "deck contains a blank card",
            ));
        }
        if self.approval.average_threshold <= 0.0 {
            issues.push(ValidationIssue::new(
                "approval.average_threshold",
                "must be positive",
            ));
        }
        if self.approval.median_threshold <= 0.0 {
            issues.push(ValidationIssue::new(
                "approval.median_threshold",
                "must be positive",
            ));
        }

        issues
    }

    /// Project the file structure onto the typed settings the services use
    pub fn to_room_settings(&self) -> RoomSettings {
        RoomSettings {
            bounds: FeatureBounds {
                priority_min: self.bounds.priority_min,
                priority_max: self.bounds.priority_max,
                difficulty_min: self.bounds.difficulty_min,
                difficulty_max: self.bounds.difficulty_max,
            },
            thresholds: ApprovalThresholds {
                average: self.approval.average_threshold,
                median: self.approval.median_threshold,
            },
            allow_list: self.room.allow_list.clone(),
            deck: self.room.deck.clone(),
        }
    }
}
