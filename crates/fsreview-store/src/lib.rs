//! fsreview store - artifact and baseline persistence
//!
//! Provides:
//! - Snapshot artifact naming, latest-walk search and loading
//! - ReportConfig / Policy loading with validation
//! - The Review Store: per-host "last known good" baselines with tamper
//!   detection and atomic, serialized updates

pub mod artifacts;
pub mod atomic;
pub mod config;
pub mod errors;
pub mod reviews;

// Re-export key types
pub use artifacts::{find_latest_walk, read_latest_walk, read_walk, walk_filename, WalkFile};
pub use config::{load_policy, load_report_config};
pub use errors::Result;
pub use reviews::ReviewStore;
