//! Join authorization port
//!
//! The static allow-list is configuration, not core logic. The coordinator
//! asks this port about the fixed set of privileged pseudos; membership in
//! the highest-priority feature's participant list is checked by the
//! coordinator itself.

/// Port for the static part of the join allow-list
pub trait AccessPolicy {
    /// Whether the pseudo is on the static allow-list (case-insensitive)
    fn allows(&self, pseudo: &str) -> bool;
}

/// Policy that admits everyone; useful in tests and single-user demos
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl AccessPolicy for OpenAccess {
    fn allows(&self, _pseudo: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_access_allows_anyone() {
        assert!(OpenAccess.allows("someone"));
        assert!(OpenAccess.allows(""));
    }
}
