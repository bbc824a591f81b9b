//! fsreview core - comparison and classification engine
//!
//! This crate holds everything that is a pure function of its inputs:
//! - Snapshot model (Walk, File, FileInfo, Fingerprint, Policy) and config types
//! - Path normalization used for every comparison key
//! - Codec capability with compact and text encodings
//! - Deterministic Walk diff with policy-aware hashing suppression
//! - Rule engine (global exclusion, ordered multi-match rules)
//! - Report aggregation, counters and the human-readable summary
//!
//! Persistence lives in `fsreview-store`; session orchestration in
//! `fsreview-engine`.

pub mod codec;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod path;
pub mod report;
pub mod rules;

// Used by the logging macros
pub use fsreview_core_types;

// Re-export commonly used types
pub use codec::{Codec, CodecKind, CompactCodec, TextCodec};
pub use diff::{compute_diff, ChangeKind, DiffEntry, DiffSet, FieldDelta};
pub use errors::{ExError, ExErrorKind, FsReviewError, Result};
pub use model::{
    File, FileInfo, Fingerprint, FingerprintMethod, Policy, ReportConfig, Review, Reviews, Walk,
};
pub use path::normalize;
pub use report::{aggregate, render_human_summary, Counter, Report};
pub use rules::{classify, Classification, RuleSet};
