//! Backlog store
//!
//! Owns the in-memory, priority-ordered feature collection and writes it
//! back through the repository port after every mutation. Single-writer
//! workload: no locking here, the host serializes calls.

use crate::ports::backlog_repository::BacklogRepository;
use poker_domain::{Feature, FeatureDraft, FeatureUpdate, FeatureBounds, ValidationIssue};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from backlog store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacklogError {
    #[error("feature {id} not found")]
    NotFound { id: u32 },

    #[error("invalid feature: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Durable ordered collection of features, sorted by ascending priority
///
/// Ties in priority keep their relative insertion order (stable sort).
pub struct BacklogStore<R: BacklogRepository> {
    repository: R,
    bounds: FeatureBounds,
    features: Vec<Feature>,
}

impl<R: BacklogRepository> BacklogStore<R> {
    /// Load the persisted backlog through the repository.
    ///
    /// A missing or corrupt source comes back as an empty collection from
    /// the adapter; that is not an error here.
    pub fn load(repository: R, bounds: FeatureBounds) -> Self {
        let mut features = repository.load();
        features.sort_by_key(|f| f.priority);
        info!(count = features.len(), "backlog loaded");
        Self {
            repository,
            bounds,
            features,
        }
    }

    /// Full ordered sequence (read-only view)
    pub fn list(&self) -> &[Feature] {
        &self.features
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The feature currently under consideration: first in priority order
    pub fn highest_priority(&self) -> Option<&Feature> {
        self.features.first()
    }

    /// Exact lookup by id
    pub fn get(&self, id: u32) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Validate, assign a fresh id, insert, re-sort, persist.
    ///
    /// Returns the stored record. The id is `max(existing) + 1`, or 1 for
    /// an empty backlog.
    pub fn add(&mut self, draft: FeatureDraft) -> Result<Feature, BacklogError> {
        self.check_bounds(Some(draft.priority), draft.difficulty)?;

        let id = self
            .features
            .iter()
            .map(|f| f.id)
            .max()
            .unwrap_or(0)
            + 1;
        let feature = draft.into_feature(id);
        debug!(id, name = %feature.name, priority = feature.priority, "feature added");

        self.features.push(feature.clone());
        self.resort();
        self.persist();
        Ok(feature)
    }

    /// Merge the present fields of `update` into the feature, re-sort,
    /// persist. Bounds are checked for any provided priority/difficulty
    /// before anything is mutated.
    pub fn update(&mut self, id: u32, update: FeatureUpdate) -> Result<Feature, BacklogError> {
        self.check_bounds(update.priority, update.difficulty)?;

        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(BacklogError::NotFound { id })?;
        update.apply_to(feature);
        let updated = feature.clone();

        self.resort();
        self.persist();
        Ok(updated)
    }

    /// Delete by id; absent ids are a no-op, not an error
    pub fn remove(&mut self, id: u32) {
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        if self.features.len() == before {
            debug!(id, "remove: feature absent, nothing to do");
        }
        self.persist();
    }

    fn check_bounds(
        &self,
        priority: Option<i64>,
        difficulty: Option<i64>,
    ) -> Result<(), BacklogError> {
        let mut issues = Vec::new();
        if let Some(priority) = priority {
            issues.extend(self.bounds.check_priority(priority));
        }
        if let Some(difficulty) = difficulty {
            issues.extend(self.bounds.check_difficulty(difficulty));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(BacklogError::Validation(issues))
        }
    }

    fn resort(&mut self) {
        // sort_by_key is stable: priority ties keep insertion order
        self.features.sort_by_key(|f| f.priority);
    }

    /// Rewrite the whole collection. A failed write degrades durability
    /// but never the in-memory state.
    fn persist(&self) {
        if let Err(error) = self.repository.save(&self.features) {
            warn!(%error, "backlog persistence failed, continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backlog_repository::RepositoryError;
    use std::cell::RefCell;

    /// In-memory repository test double
    #[derive(Default)]
    struct MemoryRepository {
        stored: RefCell<Vec<Feature>>,
        fail_saves: bool,
    }

    impl BacklogRepository for MemoryRepository {
        fn load(&self) -> Vec<Feature> {
            self.stored.borrow().clone()
        }

        fn save(&self, features: &[Feature]) -> Result<(), RepositoryError> {
            if self.fail_saves {
                return Err(RepositoryError::Unwritable("disk full".to_string()));
            }
            *self.stored.borrow_mut() = features.to_vec();
            Ok(())
        }
    }

    fn empty_store() -> BacklogStore<MemoryRepository> {
        BacklogStore::load(MemoryRepository::default(), FeatureBounds::default())
    }

    fn draft(name: &str, priority: i64) -> FeatureDraft {
        FeatureDraft::new(name, format!("{name} description"), priority)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = empty_store();
        let first = store.add(draft("a", 3)).unwrap();
        let second = store.add(draft("b", 1)).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_id_is_max_plus_one_after_removal() {
        let mut store = empty_store();
        store.add(draft("a", 1)).unwrap();
        let b = store.add(draft("b", 2)).unwrap();
        store.remove(1);
        let c = store.add(draft("c", 3)).unwrap();
        assert_eq!(b.id, 2);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_list_sorted_by_priority() {
        let mut store = empty_store();
        store.add(draft("low", 8)).unwrap();
        store.add(draft("urgent", 1)).unwrap();
        store.add(draft("mid", 4)).unwrap();

        let names: Vec<&str> = store.list().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["urgent", "mid", "low"]);
        assert_eq!(store.highest_priority().unwrap().name, "urgent");
    }

    #[test]
    fn test_priority_ties_are_stable() {
        let mut store = empty_store();
        store.add(draft("first", 2)).unwrap();
        store.add(draft("second", 2)).unwrap();
        store.add(draft("third", 2)).unwrap();

        let names: Vec<&str> = store.list().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_add_rejects_out_of_bounds_and_leaves_store_unchanged() {
        let mut store = empty_store();
        let result = store.add(draft("bad", 99));
        match result {
            Err(BacklogError::Validation(issues)) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "priority");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_collects_issue_per_field() {
        let mut store = empty_store();
        let result = store.add(draft("bad", 0).with_difficulty(0));
        match result {
            Err(BacklogError::Validation(issues)) => {
                let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
                assert_eq!(fields, vec!["priority", "difficulty"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_add_then_get_round_trips() {
        let mut store = empty_store();
        let added = store
            .add(draft("a", 2).with_difficulty(8))
            .unwrap();
        assert_eq!(store.get(added.id), Some(&added));
    }

    #[test]
    fn test_update_merges_and_resorts() {
        let mut store = empty_store();
        let a = store.add(draft("a", 1)).unwrap();
        store.add(draft("b", 2)).unwrap();

        let update = FeatureUpdate {
            priority: Some(9),
            ..Default::default()
        };
        let updated = store.update(a.id, update).unwrap();
        assert_eq!(updated.priority, 9);
        assert_eq!(updated.name, "a");
        // re-sorted: "a" moved to the back
        assert_eq!(store.list().last().unwrap().id, a.id);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = empty_store();
        let result = store.update(42, FeatureUpdate::default());
        assert_eq!(result, Err(BacklogError::NotFound { id: 42 }));
    }

    #[test]
    fn test_update_validates_provided_fields_before_mutating() {
        let mut store = empty_store();
        let a = store.add(draft("a", 1)).unwrap();
        let update = FeatureUpdate {
            name: Some("renamed".to_string()),
            priority: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            store.update(a.id, update),
            Err(BacklogError::Validation(_))
        ));
        // nothing was merged
        assert_eq!(store.get(a.id).unwrap().name, "a");
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut store = empty_store();
        store.add(draft("a", 1)).unwrap();
        store.remove(99);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_failed_persistence_keeps_memory_state() {
        let repository = MemoryRepository {
            fail_saves: true,
            ..Default::default()
        };
        let mut store = BacklogStore::load(repository, FeatureBounds::default());
        store.add(draft("a", 1)).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_load_sorts_persisted_records() {
        let repository = MemoryRepository::default();
        *repository.stored.borrow_mut() = vec![
            draft("low", 9).into_feature(1),
            draft("urgent", 1).into_feature(2),
        ];
        let store = BacklogStore::load(repository, FeatureBounds::default());
        assert_eq!(store.highest_priority().unwrap().name, "urgent");
    }
}
