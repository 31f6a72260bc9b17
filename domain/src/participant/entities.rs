//! Participant domain entities

use super::role::Role;
use serde::{Deserialize, Serialize};

/// A connected participant in the voting room (Entity)
///
/// # Example
///
/// ```
/// use poker_domain::{Participant, Role};
///
/// let p = Participant::new("hugo", "token-1");
/// assert_eq!(p.role, Role::Voter);
/// assert!(p.vote.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, stored trimmed as given; compared case-insensitively
    pub pseudo: String,
    /// Derived once at join time, never re-derived
    pub role: Role,
    /// Derived display token
    pub avatar: String,
    /// Current round's vote; `None` until cast, cleared each round
    pub vote: Option<String>,
    /// Opaque token binding a browser/terminal session to this participant
    pub connection_token: String,
}

impl Participant {
    /// Create a participant from a trimmed pseudo and a connection token.
    /// The role and avatar are derived here, once.
    pub fn new(pseudo: impl Into<String>, connection_token: impl Into<String>) -> Self {
        let pseudo = pseudo.into();
        let role = Role::for_pseudo(&pseudo);
        let avatar = derive_avatar(&pseudo);
        Self {
            pseudo,
            role,
            avatar,
            vote: None,
            connection_token: connection_token.into(),
        }
    }

    /// Case-insensitive pseudo comparison
    pub fn is_named(&self, pseudo: &str) -> bool {
        self.pseudo.eq_ignore_ascii_case(pseudo)
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }
}

/// Build the placeholder avatar URL from the first two characters of the
/// pseudo, uppercased.
fn derive_avatar(pseudo: &str) -> String {
    let prefix: String = pseudo.chars().take(2).collect::<String>().to_uppercase();
    format!("https://placehold.co/60x60/{}", prefix)
}
