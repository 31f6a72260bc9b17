//! Application-facing room settings
//!
//! [`RoomSettings`] is the typed configuration slice the services need:
//! feature bounds for the backlog store, approval thresholds and the
//! allow-list for the coordinator, and the card deck for the presentation
//! layer. The file-format side lives in the infrastructure layer.

use poker_domain::{ApprovalThresholds, FeatureBounds};

/// Typed configuration for one voting room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSettings {
    /// Inclusive bounds for feature priority and difficulty
    pub bounds: FeatureBounds,
    /// Thresholds for the numeric voting modes
    pub thresholds: ApprovalThresholds,
    /// Static set of always-admitted pseudos
    pub allow_list: Vec<String>,
    /// Card values offered to voters; advisory, not enforced by the core
    pub deck: Vec<String>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            bounds: FeatureBounds::default(),
            thresholds: ApprovalThresholds::default(),
            allow_list: ["po", "sm", "lina", "hugo"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            deck: ["0", "1", "2", "3", "5", "8", "13", "20", "40", "100"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RoomSettings {
    /// Whether a card value is part of the configured deck
    pub fn deck_contains(&self, value: &str) -> bool {
        self.deck.iter().any(|c| c == value.trim())
    }
}
