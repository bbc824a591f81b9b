//! Walk diff engine.
//!
//! Compares two Walk snapshots and produces a path-ordered, deterministic
//! [`DiffSet`].
//!
//! ## Entry point
//!
//! ```ignore
//! use fsreview_core::diff::compute_diff;
//!
//! let diff = compute_diff(Some(&before), &after)?;
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: entries are emitted in normalized-path order regardless
//!   of file order in either Walk.
//! - **Disjointness**: each path appears in at most one entry; a path with
//!   any number of attribute deltas yields a single `Modified` entry.
//! - **Policy-aware hashing**: a fingerprint present on one side only is not
//!   reported when the other side's Policy explains its absence.

pub mod engine;
pub mod model;

pub use engine::compute_diff;
pub use model::{ChangeKind, DiffEntry, DiffSet, FieldDelta};
