//! Static allow-list from configuration

use poker_application::ports::access_policy::AccessPolicy;

/// Fixed set of always-admitted pseudos, compared case-insensitively.
/// The dynamic half of admission (participants of the feature under
/// consideration) lives in the coordinator.
#[derive(Debug, Clone)]
pub struct StaticAllowList {
    pseudos: Vec<String>,
}

impl StaticAllowList {
    pub fn new(pseudos: Vec<String>) -> Self {
        Self { pseudos }
    }
}

impl AccessPolicy for StaticAllowList {
    fn allows(&self, pseudo: &str) -> bool {
        self.pseudos.iter().any(|p| p.eq_ignore_ascii_case(pseudo))
    }
}
