//! Snapshot data model.
//!
//! Plain value types for everything the engine reads or writes. All types
//! derive `Serialize`/`Deserialize` so any [`Codec`](crate::codec::Codec)
//! can carry them; none of them know about an encoding.

pub mod file;
pub mod fingerprint;
pub mod policy;
pub mod report_config;
pub mod review;
pub mod walk;

pub use file::{File, FileInfo};
pub use fingerprint::{Fingerprint, FingerprintMethod};
pub use policy::{HashEligibility, Policy};
pub use report_config::{MatcherSpec, ReportConfig, RuleConfig};
pub use review::{Review, Reviews};
pub use walk::Walk;

/// Current schema version for Walk, Policy and ReportConfig
pub const SCHEMA_VERSION: u32 = 1;
