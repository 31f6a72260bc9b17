//! Approval evaluation for a revealed voting round

use crate::backlog::voting_mode::VotingMode;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Configured approval thresholds for the numeric voting modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovalThresholds {
    /// Minimum mean vote for approval under [`VotingMode::Average`]
    pub average: f64,
    /// Minimum median vote for approval under [`VotingMode::Median`]
    pub median: f64,
}

impl Default for ApprovalThresholds {
    fn default() -> Self {
        Self {
            average: 5.0,
            median: 5.0,
        }
    }
}

/// Evaluate a set of voter votes under the given mode
///
/// `votes` maps pseudo to the raw cast value. An empty map is never
/// approved. Under the numeric modes, any vote that does not parse as a
/// number is a hard error; it is not skipped or coerced.
///
/// # Example
///
/// ```
/// use poker_domain::{evaluate, ApprovalThresholds, VotingMode};
/// use std::collections::BTreeMap;
///
/// let mut votes = BTreeMap::new();
/// votes.insert("hugo".to_string(), "5".to_string());
/// votes.insert("lina".to_string(), "5".to_string());
///
/// let thresholds = ApprovalThresholds::default();
/// let approved = evaluate(VotingMode::Unanimity, &votes, &thresholds).unwrap();
/// assert!(approved);
/// ```
pub fn evaluate(
    mode: VotingMode,
    votes: &BTreeMap<String, String>,
    thresholds: &ApprovalThresholds,
) -> Result<bool, DomainError> {
    if votes.is_empty() {
        return Ok(false);
    }

    match mode {
        VotingMode::Unanimity => {
            let distinct: HashSet<&str> = votes.values().map(String::as_str).collect();
            Ok(distinct.len() == 1)
        }
        VotingMode::Average => {
            let values = parse_numeric(votes)?;
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            Ok(mean >= thresholds.average)
        }
        VotingMode::Median => {
            let values = parse_numeric(votes)?;
            Ok(median(values) >= thresholds.median)
        }
    }
}

fn parse_numeric(votes: &BTreeMap<String, String>) -> Result<Vec<f64>, DomainError> {
    votes
        .iter()
        .map(|(pseudo, value)| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::InvalidVoteValue {
                    pseudo: pseudo.clone(),
                    value: value.clone(),
                })
        })
        .collect()
}

/// Median of a non-empty list: middle element, or mean of the two middles
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(p, v)| (p.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unanimity_approved() {
        let v = votes(&[("a", "5"), ("b", "5"), ("c", "5")]);
        let approved = evaluate(VotingMode::Unanimity, &v, &ApprovalThresholds::default());
        assert_eq!(approved, Ok(true));
    }

    #[test]
    fn test_unanimity_rejected_on_disagreement() {
        let v = votes(&[("a", "5"), ("b", "8")]);
        let approved = evaluate(VotingMode::Unanimity, &v, &ApprovalThresholds::default());
        assert_eq!(approved, Ok(false));
    }

    #[test]
    fn test_unanimity_does_not_parse_values() {
        // Non-numeric cards are fine under unanimity
        let v = votes(&[("a", "?"), ("b", "?")]);
        let approved = evaluate(VotingMode::Unanimity, &v, &ApprovalThresholds::default());
        assert_eq!(approved, Ok(true));
    }

    #[test]
    fn test_average_threshold() {
        let thresholds = ApprovalThresholds {
            average: 4.0,
            median: 5.0,
        };
        // mean 4.0 meets the threshold
        let v = votes(&[("a", "3"), ("b", "5")]);
        assert_eq!(evaluate(VotingMode::Average, &v, &thresholds), Ok(true));

        // mean 1.5 does not
        let v = votes(&[("a", "1"), ("b", "2")]);
        assert_eq!(evaluate(VotingMode::Average, &v, &thresholds), Ok(false));
    }

    #[test]
    fn test_median_threshold() {
        let thresholds = ApprovalThresholds {
            average: 5.0,
            median: 5.0,
        };
        let v = votes(&[("a", "3"), ("b", "5"), ("c", "8")]);
        assert_eq!(evaluate(VotingMode::Median, &v, &thresholds), Ok(true));

        let v = votes(&[("a", "1"), ("b", "3"), ("c", "13")]);
        assert_eq!(evaluate(VotingMode::Median, &v, &thresholds), Ok(false));
    }

    #[test]
    fn test_median_even_count_averages_middles() {
        let thresholds = ApprovalThresholds {
            average: 5.0,
            median: 4.0,
        };
        // sorted: 2 3 5 8, median = 4.0
        let v = votes(&[("a", "5"), ("b", "2"), ("c", "8"), ("d", "3")]);
        assert_eq!(evaluate(VotingMode::Median, &v, &thresholds), Ok(true));
    }

    #[test]
    fn test_numeric_mode_rejects_unparseable_vote() {
        let v = votes(&[("a", "5"), ("b", "coffee")]);
        let result = evaluate(VotingMode::Average, &v, &ApprovalThresholds::default());
        assert_eq!(
            result,
            Err(DomainError::InvalidVoteValue {
                pseudo: "b".to_string(),
                value: "coffee".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_votes_never_approved() {
        let v = BTreeMap::new();
        for mode in [VotingMode::Unanimity, VotingMode::Average, VotingMode::Median] {
            assert_eq!(evaluate(mode, &v, &ApprovalThresholds::default()), Ok(false));
        }
    }
}
