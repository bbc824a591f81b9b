//! Walk snapshots.

use crate::errors::FsReviewError;
use crate::model::file::File;
use crate::model::policy::Policy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One complete, immutable traversal of a host's file tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walk {
    /// UUID of this traversal
    pub id: String,
    pub version: u32,
    pub hostname: String,
    pub start_walk: DateTime<Utc>,
    pub stop_walk: DateTime<Utc>,
    pub policy: Policy,
    #[serde(default)]
    pub files: Vec<File>,
}

impl Walk {
    /// Index files by normalized path.
    ///
    /// # Errors
    ///
    /// `DuplicatePath` if two files normalize to the same key.
    pub fn index(&self) -> Result<BTreeMap<String, &File>, FsReviewError> {
        let mut index = BTreeMap::new();
        for file in &self.files {
            let key = file.normalized_path();
            if index.contains_key(&key) {
                return Err(FsReviewError::DuplicatePath {
                    walk_id: self.id.clone(),
                    path: key,
                });
            }
            index.insert(key, file);
        }
        Ok(index)
    }
}
