//! Walk diff computation.
//!
//! The entry point is [`compute_diff`], which takes an optional before Walk
//! and an after Walk and produces a [`DiffSet`].

use crate::diff::model::{DiffEntry, DiffSet, FieldDelta};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{File, FingerprintMethod, Policy, Walk};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of comparing the fingerprints of one shared path
#[derive(Default)]
struct FingerprintComparison {
    deltas: Vec<FieldDelta>,
    suppressed: u64,
}

/// Compare `info` fields; each differing field is its own delta.
fn info_deltas(before: &File, after: &File, deltas: &mut Vec<FieldDelta>) {
    let (b, a) = (&before.info, &after.info);
    if b.size != a.size {
        deltas.push(FieldDelta::Size {
            old: b.size,
            new: a.size,
        });
    }
    if b.mode != a.mode {
        deltas.push(FieldDelta::Mode {
            old: b.mode,
            new: a.mode,
        });
    }
    if b.is_dir != a.is_dir {
        deltas.push(FieldDelta::IsDir {
            old: b.is_dir,
            new: a.is_dir,
        });
    }
    // Only comparable when both walkers recorded it
    if let (Some(old), Some(new)) = (b.modified, a.modified) {
        if old != new {
            deltas.push(FieldDelta::ModTime { old, new });
        }
    }
}

/// Compare fingerprints method by method.
///
/// A method on one side only is suppressed when the side lacking it was not
/// eligible for hashing under its own Walk's Policy.
fn fingerprint_deltas(
    before: &File,
    before_policy: &Policy,
    after: &File,
    after_policy: &Policy,
) -> FingerprintComparison {
    let methods: BTreeSet<FingerprintMethod> = before
        .fingerprints
        .iter()
        .chain(after.fingerprints.iter())
        .map(|fp| fp.method)
        .collect();

    let mut out = FingerprintComparison::default();
    for method in methods {
        match (before.fingerprint(method), after.fingerprint(method)) {
            (Some(old), Some(new)) => {
                if old.value != new.value {
                    out.deltas.push(FieldDelta::Content {
                        method,
                        old: old.value.clone(),
                        new: new.value.clone(),
                    });
                }
            }
            (None, Some(new)) => {
                if before_policy.hash_eligibility(before).is_eligible() {
                    out.deltas.push(FieldDelta::HashingAdded {
                        method,
                        value: new.value.clone(),
                    });
                } else {
                    out.suppressed += 1;
                }
            }
            (Some(old), None) => {
                if after_policy.hash_eligibility(after).is_eligible() {
                    out.deltas.push(FieldDelta::HashingRemoved {
                        method,
                        value: old.value.clone(),
                    });
                } else {
                    out.suppressed += 1;
                }
            }
            (None, None) => {}
        }
    }
    out
}

/// Verify entries are strictly increasing by path.
///
/// Guards the ordering and one-entry-per-path guarantees of the output.
fn check_ordering(entries: &[DiffEntry]) -> Result<()> {
    for pair in entries.windows(2) {
        if pair[0].path() >= pair[1].path() {
            return Err(ExError::new(ExErrorKind::DeterminismViolation)
                .with_op("compute_diff")
                .with_path(pair[1].path())
                .with_message(format!(
                    "diff entries out of order: {} then {}",
                    pair[0].path(),
                    pair[1].path()
                )));
        }
    }
    Ok(())
}

/// Compute a structured, deterministic diff between two Walks.
///
/// With `before` absent every file in `after` is `Added` (first-run mode).
///
/// # Errors
///
/// - `InvalidInput` if either Walk lists the same normalized path twice
/// - `DeterminismViolation` if the produced diff fails its ordering
///   self-check (should never occur in correct builds)
pub fn compute_diff(before: Option<&Walk>, after: &Walk) -> Result<DiffSet> {
    let after_index = after.index().map_err(ExError::from)?;
    let before_index: BTreeMap<String, &File> = match before {
        Some(walk) => walk.index().map_err(ExError::from)?,
        None => BTreeMap::new(),
    };

    let keys: BTreeSet<&String> = before_index.keys().chain(after_index.keys()).collect();

    // Without a before Walk no path is shared, so its policy is never consulted
    let before_policy = before.map_or(&after.policy, |walk| &walk.policy);
    let after_policy = &after.policy;

    let mut entries = Vec::new();
    let mut suppressed_hashing = 0;
    for key in keys {
        match (before_index.get(key), after_index.get(key)) {
            (None, Some(file)) => entries.push(DiffEntry::Added {
                path: key.clone(),
                file: (*file).clone(),
            }),
            (Some(file), None) => entries.push(DiffEntry::Removed {
                path: key.clone(),
                file: (*file).clone(),
            }),
            (Some(b), Some(a)) => {
                let mut deltas = Vec::new();
                info_deltas(b, a, &mut deltas);
                let fps = fingerprint_deltas(b, before_policy, a, after_policy);
                deltas.extend(fps.deltas);
                suppressed_hashing += fps.suppressed;
                if !deltas.is_empty() {
                    entries.push(DiffEntry::Modified {
                        path: key.clone(),
                        before: (*b).clone(),
                        after: (*a).clone(),
                        deltas,
                    });
                }
            }
            (None, None) => {}
        }
    }

    check_ordering(&entries)?;

    Ok(DiffSet {
        before_present: before.is_some(),
        before_files: before_index.len() as u64,
        after_files: after_index.len() as u64,
        suppressed_hashing,
        entries,
    })
}
