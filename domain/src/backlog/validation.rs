//! Field-level validation for feature records

use serde::{Deserialize, Serialize};

/// A single validation problem, tied to the field that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field the issue applies to (e.g. "priority")
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configured inclusive bounds for feature priority and difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBounds {
    pub priority_min: i64,
    pub priority_max: i64,
    pub difficulty_min: i64,
    pub difficulty_max: i64,
}

impl Default for FeatureBounds {
    fn default() -> Self {
        Self {
            priority_min: 1,
            priority_max: 10,
            difficulty_min: 1,
            difficulty_max: 100,
        }
    }
}

impl FeatureBounds {
    /// Check a priority value, reporting an issue when out of range
    pub fn check_priority(&self, priority: i64) -> Option<ValidationIssue> {
        if priority < self.priority_min || priority > self.priority_max {
            Some(ValidationIssue::new(
                "priority",
                format!(
                    "must be between {} and {}, got {}",
                    self.priority_min, self.priority_max, priority
                ),
            ))
        } else {
            None
        }
    }

    /// Check a difficulty value, reporting an issue when out of range
    pub fn check_difficulty(&self, difficulty: i64) -> Option<ValidationIssue> {
        if difficulty < self.difficulty_min || difficulty > self.difficulty_max {
            Some(ValidationIssue::new(
                "difficulty",
                format!(
                    "must be between {} and {}, got {}",
                    self.difficulty_min, self.difficulty_max, difficulty
                ),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_in_bounds() {
        let bounds = FeatureBounds::default();
        assert!(bounds.check_priority(1).is_none());
        assert!(bounds.check_priority(10).is_none());
    }

    #[test]
    fn test_priority_out_of_bounds() {
        let bounds = FeatureBounds::default();
        let issue = bounds.check_priority(0).unwrap();
        assert_eq!(issue.field, "priority");
        assert!(issue.message.contains("between 1 and 10"));
        assert!(bounds.check_priority(11).is_some());
    }

    #[test]
    fn test_difficulty_bounds() {
        let bounds = FeatureBounds::default();
        assert!(bounds.check_difficulty(1).is_none());
        assert!(bounds.check_difficulty(100).is_none());
        assert!(bounds.check_difficulty(0).is_some());
        assert!(bounds.check_difficulty(101).is_some());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("priority", "out of range");
        assert_eq!(issue.to_string(), "priority: out of range");
    }
}
