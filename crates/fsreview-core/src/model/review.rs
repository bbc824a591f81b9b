//! Last-known-good baseline records.

use crate::model::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Baseline reference for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub walk_id: String,
    /// Locator of the baseline Walk artifact
    pub walk_reference: String,
    /// Fingerprint over the artifact's bytes at update time
    pub fingerprint: Fingerprint,
}

/// Persisted mapping hostname → Review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviews {
    #[serde(default)]
    pub review: BTreeMap<String, Review>,
}

impl Reviews {
    pub fn get(&self, hostname: &str) -> Option<&Review> {
        self.review.get(hostname)
    }

    /// Insert or replace the Review for `hostname`, returning the old one
    pub fn upsert(&mut self, hostname: impl Into<String>, review: Review) -> Option<Review> {
        self.review.insert(hostname.into(), review)
    }
}
