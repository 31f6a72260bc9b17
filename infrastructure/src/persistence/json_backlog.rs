//! JSON-file backlog repository
//!
//! Stores the whole backlog as one pretty-printed JSON document:
//! `{"backlog": [ ... ]}` with the legacy field names. Single-writer
//! workload: every save is a full rewrite, no locking.

use poker_application::ports::backlog_repository::{BacklogRepository, RepositoryError};
use poker_domain::Feature;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Default)]
struct BacklogDocument {
    #[serde(default)]
    backlog: Vec<Feature>,
}

/// File-backed implementation of the backlog repository port
pub struct JsonBacklogRepository {
    path: PathBuf,
}

impl JsonBacklogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BacklogRepository for JsonBacklogRepository {
    /// Fail open: a missing, empty or malformed file is an empty backlog,
    /// logged but never an error.
    fn load(&self) -> Vec<Feature> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "backlog file unreadable, starting empty");
                return Vec::new();
            }
        };
        if contents.trim().is_empty() {
            warn!(path = %self.path.display(), "backlog file is empty, starting empty");
            return Vec::new();
        }
        match serde_json::from_str::<BacklogDocument>(&contents) {
            Ok(document) => {
                debug!(path = %self.path.display(), count = document.backlog.len(), "backlog file loaded");
                document.backlog
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "backlog file malformed, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, features: &[Feature]) -> Result<(), RepositoryError> {
        let document = BacklogDocument {
            backlog: features.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| RepositoryError::Unwritable(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::Unwritable(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| RepositoryError::Unwritable(e.to_string()))?;
        debug!(path = %self.path.display(), count = features.len(), "backlog file saved");
        Ok(())
    }
}
