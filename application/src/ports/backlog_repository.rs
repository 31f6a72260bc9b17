//! Backlog persistence port

use poker_domain::Feature;
use thiserror::Error;

/// Errors from the persistence adapter
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("backlog source unreadable: {0}")]
    Unreadable(String),

    #[error("backlog sink unwritable: {0}")]
    Unwritable(String),
}

/// Repository trait for backlog persistence
///
/// Implementations live in the infrastructure layer. The contract is
/// whole-collection: `save` rewrites everything, `load` reads everything.
/// `load` fails open — a missing or corrupt source yields an empty
/// collection (logged by the adapter), never an error the store must
/// handle. `save` may fail; the store logs and keeps operating in memory.
pub trait BacklogRepository {
    /// Read all persisted features. Missing/empty/corrupt source → empty vec.
    fn load(&self) -> Vec<Feature>;

    /// Rewrite the whole collection.
    fn save(&self, features: &[Feature]) -> Result<(), RepositoryError>;
}
