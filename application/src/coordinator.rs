//! Session/voting coordinator
//!
//! One explicitly-owned state object for the single global voting room:
//! the connected roster, the active feature, and the round indicators.
//! Every operation is a fast synchronous transition; the host serializes
//! mutating calls (single-threaded loop or an explicit guard), the
//! coordinator itself carries no locking.
//!
//! Reveal and validate are deliberately permissive: they may be called in
//! either order and repeated. The privileged caller (Scrum Master) is
//! trusted to sequence them.

use crate::backlog_store::BacklogStore;
use crate::ports::access_policy::AccessPolicy;
use crate::ports::backlog_repository::BacklogRepository;
use poker_domain::{
    ApprovalThresholds, DomainError, Feature, Participant, Role, evaluate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from coordinator operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("pseudo '{pseudo}' is not authorized to join this session")]
    Unauthorized { pseudo: String },

    #[error("a participant named '{pseudo}' is already connected")]
    DuplicatePseudo { pseudo: String },

    #[error("a {role} is already connected")]
    RoleTaken { role: Role },

    #[error("no connected participant named '{pseudo}'")]
    UnknownParticipant { pseudo: String },

    #[error("feature {id} not found")]
    FeatureNotFound { id: u32 },

    #[error("'{pseudo}' has already voted this round")]
    AlreadyVoted { pseudo: String },

    #[error("vote value cannot be empty")]
    EmptyVote,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Phase indicators for the single global round
///
/// Votes are meaningful only while `active_feature_id` is set and
/// `voting_started` is true. One round exists system-wide; starting a new
/// round overwrites the previous one's indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub active_feature_id: Option<u32>,
    pub voting_started: bool,
    pub votes_revealed: bool,
    pub everyone_voted: bool,
    pub feature_approved: bool,
    pub discussion_active: bool,
}

/// Coordinator for the connected roster and the global voting round
pub struct SessionCoordinator<R: BacklogRepository, P: AccessPolicy> {
    backlog: BacklogStore<R>,
    policy: P,
    thresholds: ApprovalThresholds,
    roster: Vec<Participant>,
    /// Acting identity for the next privileged action
    active_pseudo: Option<String>,
    round: RoundState,
}

impl<R: BacklogRepository, P: AccessPolicy> SessionCoordinator<R, P> {
    pub fn new(backlog: BacklogStore<R>, policy: P, thresholds: ApprovalThresholds) -> Self {
        Self {
            backlog,
            policy,
            thresholds,
            roster: Vec::new(),
            active_pseudo: None,
            round: RoundState::default(),
        }
    }

    pub fn backlog(&self) -> &BacklogStore<R> {
        &self.backlog
    }

    pub fn backlog_mut(&mut self) -> &mut BacklogStore<R> {
        &mut self.backlog
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn participant(&self, pseudo: &str) -> Option<&Participant> {
        self.roster.iter().find(|p| p.is_named(pseudo))
    }

    pub fn pseudo_list(&self) -> Vec<String> {
        self.roster.iter().map(|p| p.pseudo.clone()).collect()
    }

    /// Connect a participant.
    ///
    /// The pseudo is stored trimmed as given; all comparisons are
    /// case-insensitive. Admission requires the static allow-list OR
    /// membership in the currently highest-priority feature's participant
    /// list. The role is derived here, once, and the unique roles
    /// (Product Owner, Scrum Master) are enforced against the roster.
    pub fn join(
        &mut self,
        pseudo: &str,
        connection_token: &str,
    ) -> Result<Participant, SessionError> {
        let pseudo = pseudo.trim();
        if pseudo.is_empty() {
            return Err(DomainError::EmptyPseudo.into());
        }

        let expected = self
            .backlog
            .highest_priority()
            .is_some_and(|f| f.expects(pseudo));
        if !self.policy.allows(pseudo) && !expected {
            return Err(SessionError::Unauthorized {
                pseudo: pseudo.to_string(),
            });
        }

        if self.roster.iter().any(|p| p.is_named(pseudo)) {
            return Err(SessionError::DuplicatePseudo {
                pseudo: pseudo.to_string(),
            });
        }

        let role = Role::for_pseudo(pseudo);
        if role.is_unique() && self.roster.iter().any(|p| p.role == role) {
            return Err(SessionError::RoleTaken { role });
        }

        info!(pseudo, %role, "participant joined");
        let participant = Participant::new(pseudo, connection_token);
        self.roster.push(participant.clone());
        Ok(participant)
    }

    /// Disconnect by connection token; unknown tokens are a no-op
    pub fn logout(&mut self, connection_token: &str) {
        let before = self.roster.len();
        self.roster.retain(|p| p.connection_token != connection_token);
        if self.roster.len() < before {
            info!(connection_token, "participant logged out");
        }
    }

    /// Mark one connected participant as the acting identity
    pub fn select(&mut self, pseudo: &str) -> Result<(), SessionError> {
        let stored = self
            .participant(pseudo)
            .map(|p| p.pseudo.clone())
            .ok_or_else(|| SessionError::UnknownParticipant {
                pseudo: pseudo.to_string(),
            })?;
        self.active_pseudo = Some(stored);
        Ok(())
    }

    pub fn active_participant(&self) -> Option<&Participant> {
        self.active_pseudo
            .as_deref()
            .and_then(|pseudo| self.participant(pseudo))
    }

    /// True iff every pseudo the feature expects is connected, any role
    pub fn is_team_complete(&self, feature: &Feature) -> bool {
        feature
            .participants
            .iter()
            .all(|expected| self.roster.iter().any(|p| p.is_named(expected)))
    }

    /// Expected participant list for a feature
    pub fn expected_participants(&self, feature_id: u32) -> Result<&[String], SessionError> {
        self.backlog
            .get(feature_id)
            .map(|f| f.participants.as_slice())
            .ok_or(SessionError::FeatureNotFound { id: feature_id })
    }

    /// Open a fresh round against the given feature.
    ///
    /// Clears every participant's vote and all per-round indicators. No
    /// history of the previous round is kept; restarting simply clears
    /// again.
    pub fn start_round(&mut self, feature_id: u32) -> Result<(), SessionError> {
        let feature = self
            .backlog
            .get(feature_id)
            .ok_or(SessionError::FeatureNotFound { id: feature_id })?;
        info!(feature_id, name = %feature.name, "voting round started");

        self.round.active_feature_id = Some(feature_id);
        self.round.voting_started = true;
        self.round.everyone_voted = false;
        self.round.votes_revealed = false;
        self.round.feature_approved = false;
        for participant in &mut self.roster {
            participant.vote = None;
        }
        Ok(())
    }

    /// Record a vote: one per participant per round, never overwritten.
    /// The value is opaque; only non-emptiness is enforced here.
    pub fn cast_vote(&mut self, pseudo: &str, value: &str) -> Result<(), SessionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SessionError::EmptyVote);
        }

        let participant = self
            .roster
            .iter_mut()
            .find(|p| p.is_named(pseudo))
            .ok_or_else(|| SessionError::UnknownParticipant {
                pseudo: pseudo.to_string(),
            })?;
        if participant.has_voted() {
            return Err(SessionError::AlreadyVoted {
                pseudo: participant.pseudo.clone(),
            });
        }

        debug!(pseudo = %participant.pseudo, value, "vote recorded");
        participant.vote = Some(value.to_string());
        self.round.everyone_voted = self.all_voted();
        Ok(())
    }

    /// True iff every connected Voter has voted. The Product Owner and
    /// Scrum Master do not vote and are excluded.
    pub fn all_voted(&self) -> bool {
        self.roster
            .iter()
            .filter(|p| p.role.votes())
            .all(Participant::has_voted)
    }

    /// Snapshot of every non-null vote, any role. Repeatable: calling
    /// again re-returns the current snapshot.
    pub fn reveal_votes(&mut self) -> BTreeMap<String, String> {
        self.round.votes_revealed = true;
        self.roster
            .iter()
            .filter_map(|p| p.vote.clone().map(|v| (p.pseudo.clone(), v)))
            .collect()
    }

    /// The approval decision for the active feature.
    ///
    /// Without an active feature, or without at least one Voter vote, this
    /// is "not approved" — not an error. Under a numeric mode an
    /// unparseable vote is a hard stop ([`DomainError::InvalidVoteValue`]),
    /// and the approval indicator is left untouched.
    pub fn validate_round(&mut self) -> Result<bool, SessionError> {
        let Some(feature_id) = self.round.active_feature_id else {
            debug!("validate: no active feature");
            return Ok(false);
        };

        let votes: BTreeMap<String, String> = self
            .roster
            .iter()
            .filter(|p| p.role.votes())
            .filter_map(|p| p.vote.clone().map(|v| (p.pseudo.clone(), v)))
            .collect();
        if votes.is_empty() {
            debug!(feature_id, "validate: no voter votes yet");
            return Ok(false);
        }

        let Some(feature) = self.backlog.get(feature_id) else {
            debug!(feature_id, "validate: active feature no longer in backlog");
            return Ok(false);
        };

        let approved = evaluate(feature.voting_mode, &votes, &self.thresholds)?;
        info!(
            feature_id,
            mode = %feature.voting_mode,
            approved,
            "round validated"
        );
        self.round.feature_approved = approved;
        Ok(approved)
    }

    /// Clear votes and the started/revealed indicators. The active feature
    /// and the approval indicator survive; a `start_round` is required for
    /// a full restart.
    pub fn reset_round(&mut self) {
        for participant in &mut self.roster {
            participant.vote = None;
        }
        self.round.voting_started = false;
        self.round.votes_revealed = false;
        info!("round reset");
    }

    /// Advisory indicator for the UI; no other effect
    pub fn open_discussion(&mut self) {
        self.round.discussion_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::access_policy::OpenAccess;
    use crate::ports::backlog_repository::RepositoryError;
    use poker_domain::{FeatureBounds, FeatureDraft, VotingMode};

    struct NullRepository;

    impl BacklogRepository for NullRepository {
        fn load(&self) -> Vec<Feature> {
            Vec::new()
        }

        fn save(&self, _features: &[Feature]) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    /// Allow-list double mirroring the configured static policy
    struct FixedList(Vec<&'static str>);

    impl AccessPolicy for FixedList {
        fn allows(&self, pseudo: &str) -> bool {
            self.0.iter().any(|p| p.eq_ignore_ascii_case(pseudo))
        }
    }

    type TestCoordinator<P> = SessionCoordinator<NullRepository, P>;

    fn coordinator() -> TestCoordinator<FixedList> {
        let backlog = BacklogStore::load(NullRepository, FeatureBounds::default());
        SessionCoordinator::new(
            backlog,
            FixedList(vec!["po", "sm", "lina", "hugo"]),
            ApprovalThresholds::default(),
        )
    }

    fn add_feature(
        coordinator: &mut TestCoordinator<FixedList>,
        mode: VotingMode,
        participants: &[&str],
    ) -> u32 {
        coordinator
            .backlog_mut()
            .add(
                FeatureDraft::new("payments", "pay by card", 1)
                    .with_voting_mode(mode)
                    .with_participants(participants.iter().map(|s| s.to_string()).collect()),
            )
            .unwrap()
            .id
    }

    #[test]
    fn test_join_assigns_roles() {
        let mut c = coordinator();
        assert_eq!(c.join("po", "t1").unwrap().role, Role::ProductOwner);
        assert_eq!(c.join("SM", "t2").unwrap().role, Role::ScrumMaster);
        assert_eq!(c.join("hugo", "t3").unwrap().role, Role::Voter);
    }

    #[test]
    fn test_join_rejects_duplicate_and_keeps_roster() {
        let mut c = coordinator();
        c.join("hugo", "t1").unwrap();
        let result = c.join("Hugo", "t2");
        assert_eq!(
            result.err(),
            Some(SessionError::DuplicatePseudo {
                pseudo: "Hugo".to_string()
            })
        );
        assert_eq!(c.roster().len(), 1);
        assert_eq!(c.roster()[0].connection_token, "t1");
    }

    #[test]
    fn test_join_rejects_second_product_owner() {
        let mut c = coordinator();
        c.join("po", "t1").unwrap();
        c.logout("t1");
        // role freed by logout
        c.join("PO", "t2").unwrap();
        assert_eq!(
            c.join("po", "t3").err(),
            Some(SessionError::DuplicatePseudo {
                pseudo: "po".to_string()
            })
        );
    }

    #[test]
    fn test_role_uniqueness_across_join_logout_sequences() {
        let mut c = coordinator();
        c.join("sm", "t1").unwrap();
        let owners = |c: &TestCoordinator<FixedList>, role: Role| {
            c.roster().iter().filter(|p| p.role == role).count()
        };
        assert_eq!(owners(&c, Role::ScrumMaster), 1);
        c.join("po", "t2").unwrap();
        c.join("hugo", "t3").unwrap();
        assert_eq!(owners(&c, Role::ProductOwner), 1);
        assert_eq!(owners(&c, Role::ScrumMaster), 1);
    }

    #[test]
    fn test_join_rejects_unlisted_pseudo() {
        let mut c = coordinator();
        assert_eq!(
            c.join("intruder", "t1").err(),
            Some(SessionError::Unauthorized {
                pseudo: "intruder".to_string()
            })
        );
    }

    #[test]
    fn test_join_admits_feature_participant_not_on_static_list() {
        let mut c = coordinator();
        add_feature(&mut c, VotingMode::Unanimity, &["marc"]);
        assert!(c.join("marc", "t1").is_ok());
    }

    #[test]
    fn test_join_rejects_empty_pseudo() {
        let mut c = coordinator();
        assert_eq!(
            c.join("   ", "t1").err(),
            Some(SessionError::Domain(DomainError::EmptyPseudo))
        );
    }

    #[test]
    fn test_logout_removes_exactly_the_token_holder() {
        let mut c = coordinator();
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();
        c.logout("t1");
        assert_eq!(c.pseudo_list(), vec!["lina".to_string()]);
        // unknown token is a no-op
        c.logout("nope");
        assert_eq!(c.roster().len(), 1);
    }

    #[test]
    fn test_select_requires_connected_pseudo() {
        let mut c = coordinator();
        c.join("hugo", "t1").unwrap();
        assert!(c.select("HUGO").is_ok());
        assert_eq!(c.active_participant().unwrap().pseudo, "hugo");
        assert_eq!(
            c.select("lina").err(),
            Some(SessionError::UnknownParticipant {
                pseudo: "lina".to_string()
            })
        );
    }

    #[test]
    fn test_is_team_complete() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        let feature = c.backlog().get(id).unwrap().clone();

        c.join("hugo", "t1").unwrap();
        assert!(!c.is_team_complete(&feature));
        c.join("lina", "t2").unwrap();
        assert!(c.is_team_complete(&feature));
        // roles beyond the expected list don't break completeness
        c.join("po", "t3").unwrap();
        assert!(c.is_team_complete(&feature));
    }

    #[test]
    fn test_start_round_unknown_feature() {
        let mut c = coordinator();
        assert_eq!(
            c.start_round(7).err(),
            Some(SessionError::FeatureNotFound { id: 7 })
        );
    }

    #[test]
    fn test_start_round_clears_previous_round() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();

        c.start_round(id).unwrap();
        c.cast_vote("hugo", "5").unwrap();
        c.cast_vote("lina", "5").unwrap();
        c.reveal_votes();
        c.validate_round().unwrap();
        assert!(c.round().feature_approved);

        c.start_round(id).unwrap();
        let round = c.round();
        assert_eq!(round.active_feature_id, Some(id));
        assert!(round.voting_started);
        assert!(!round.votes_revealed);
        assert!(!round.everyone_voted);
        assert!(!round.feature_approved);
        assert!(c.roster().iter().all(|p| p.vote.is_none()));
    }

    #[test]
    fn test_cast_vote_is_single_shot() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo"]);
        c.join("hugo", "t1").unwrap();
        c.start_round(id).unwrap();

        c.cast_vote("hugo", "5").unwrap();
        assert_eq!(
            c.cast_vote("hugo", "8").err(),
            Some(SessionError::AlreadyVoted {
                pseudo: "hugo".to_string()
            })
        );
        // the first vote survives
        assert_eq!(c.participant("hugo").unwrap().vote.as_deref(), Some("5"));
    }

    #[test]
    fn test_cast_vote_rejects_empty_value_and_unknown_pseudo() {
        let mut c = coordinator();
        c.join("hugo", "t1").unwrap();
        assert_eq!(c.cast_vote("hugo", "  ").err(), Some(SessionError::EmptyVote));
        assert_eq!(
            c.cast_vote("marc", "5").err(),
            Some(SessionError::UnknownParticipant {
                pseudo: "marc".to_string()
            })
        );
    }

    #[test]
    fn test_all_voted_ignores_facilitators() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        c.join("po", "t0").unwrap();
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();
        c.start_round(id).unwrap();

        c.cast_vote("hugo", "5").unwrap();
        assert!(!c.all_voted());
        assert!(!c.round().everyone_voted);
        c.cast_vote("lina", "8").unwrap();
        // the Product Owner never voted, and doesn't need to
        assert!(c.all_voted());
        assert!(c.round().everyone_voted);
    }

    #[test]
    fn test_reveal_votes_is_repeatable() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();
        c.start_round(id).unwrap();
        c.cast_vote("hugo", "5").unwrap();

        let first = c.reveal_votes();
        assert_eq!(first.get("hugo").map(String::as_str), Some("5"));
        assert_eq!(first.len(), 1);
        assert!(c.round().votes_revealed);

        c.cast_vote("lina", "8").unwrap();
        let second = c.reveal_votes();
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_validate_without_active_feature_is_not_approved() {
        let mut c = coordinator();
        c.join("hugo", "t1").unwrap();
        assert_eq!(c.validate_round(), Ok(false));
        assert!(!c.round().feature_approved);
    }

    #[test]
    fn test_validate_without_votes_is_not_approved() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo"]);
        c.join("hugo", "t1").unwrap();
        c.start_round(id).unwrap();
        assert_eq!(c.validate_round(), Ok(false));
    }

    #[test]
    fn test_validate_unanimity() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();
        c.start_round(id).unwrap();
        c.cast_vote("hugo", "5").unwrap();
        c.cast_vote("lina", "8").unwrap();
        assert_eq!(c.validate_round(), Ok(false));
        assert!(!c.round().feature_approved);

        c.start_round(id).unwrap();
        c.cast_vote("hugo", "5").unwrap();
        c.cast_vote("lina", "5").unwrap();
        assert_eq!(c.validate_round(), Ok(true));
        assert!(c.round().feature_approved);
    }

    #[test]
    fn test_validate_excludes_facilitator_votes() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        c.join("sm", "t0").unwrap();
        c.join("hugo", "t1").unwrap();
        c.join("lina", "t2").unwrap();
        c.start_round(id).unwrap();
        // a stray facilitator vote must not break unanimity
        c.cast_vote("sm", "13").unwrap();
        c.cast_vote("hugo", "5").unwrap();
        c.cast_vote("lina", "5").unwrap();
        assert_eq!(c.validate_round(), Ok(true));
    }

    #[test]
    fn test_validate_average_mode_with_thresholds() {
        let backlog = BacklogStore::load(NullRepository, FeatureBounds::default());
        let mut c = SessionCoordinator::new(
            backlog,
            OpenAccess,
            ApprovalThresholds {
                average: 4.0,
                median: 5.0,
            },
        );
        let id = add_feature_open(&mut c, VotingMode::Average, &["a", "b"]);
        c.join("a", "t1").unwrap();
        c.join("b", "t2").unwrap();
        c.start_round(id).unwrap();
        c.cast_vote("a", "3").unwrap();
        c.cast_vote("b", "5").unwrap();
        // mean 4.0 meets the threshold
        assert_eq!(c.validate_round(), Ok(true));

        c.start_round(id).unwrap();
        c.cast_vote("a", "1").unwrap();
        c.cast_vote("b", "2").unwrap();
        assert_eq!(c.validate_round(), Ok(false));
    }

    fn add_feature_open(
        c: &mut SessionCoordinator<NullRepository, OpenAccess>,
        mode: VotingMode,
        participants: &[&str],
    ) -> u32 {
        c.backlog_mut()
            .add(
                FeatureDraft::new("payments", "pay by card", 1)
                    .with_voting_mode(mode)
                    .with_participants(participants.iter().map(|s| s.to_string()).collect()),
            )
            .unwrap()
            .id
    }

    #[test]
    fn test_validate_numeric_mode_hard_stops_on_bad_vote() {
        let backlog = BacklogStore::load(NullRepository, FeatureBounds::default());
        let mut c =
            SessionCoordinator::new(backlog, OpenAccess, ApprovalThresholds::default());
        let id = add_feature_open(&mut c, VotingMode::Average, &["a", "b"]);
        c.join("a", "t1").unwrap();
        c.join("b", "t2").unwrap();
        c.start_round(id).unwrap();
        c.cast_vote("a", "5").unwrap();
        c.cast_vote("b", "coffee").unwrap();

        let result = c.validate_round();
        assert!(matches!(
            result,
            Err(SessionError::Domain(DomainError::InvalidVoteValue { .. }))
        ));
        // the approval indicator was not touched
        assert!(!c.round().feature_approved);
    }

    #[test]
    fn test_reset_round_keeps_active_feature_and_verdict() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo"]);
        c.join("hugo", "t1").unwrap();
        c.start_round(id).unwrap();
        c.cast_vote("hugo", "5").unwrap();
        c.reveal_votes();
        c.validate_round().unwrap();

        c.reset_round();
        let round = c.round();
        assert!(!round.voting_started);
        assert!(!round.votes_revealed);
        assert_eq!(round.active_feature_id, Some(id));
        assert!(round.feature_approved);
        assert!(c.participant("hugo").unwrap().vote.is_none());
    }

    #[test]
    fn test_open_discussion_sets_only_its_flag() {
        let mut c = coordinator();
        c.open_discussion();
        assert!(c.round().discussion_active);
        assert!(!c.round().voting_started);
    }

    #[test]
    fn test_expected_participants() {
        let mut c = coordinator();
        let id = add_feature(&mut c, VotingMode::Unanimity, &["hugo", "lina"]);
        assert_eq!(
            c.expected_participants(id).unwrap(),
            &["hugo".to_string(), "lina".to_string()]
        );
        assert_eq!(
            c.expected_participants(99).err(),
            Some(SessionError::FeatureNotFound { id: 99 })
        );
    }
}
