//! Baseline update gate.
//!
//! Updating a baseline is the only mutating operation and needs explicit
//! confirmation. The gate is injected by the caller: the CLI asks a human,
//! tests use the fixed implementations below. A declined gate is a normal
//! outcome, not an error.

use fsreview_store::WalkFile;

/// Decides whether `after` may become the last known good for `hostname`
pub trait BaselineUpdateGate {
    fn confirm(&self, hostname: &str, after: &WalkFile) -> bool;
}

/// Gate that approves every update
///
/// # Example
/// ```ignore
/// use fsreview_engine::gate::{BaselineUpdateGate, ConfirmAll};
///
/// assert!(ConfirmAll.confirm("web-01", &walk_file));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmAll;

impl BaselineUpdateGate for ConfirmAll {
    fn confirm(&self, _hostname: &str, _after: &WalkFile) -> bool {
        true
    }
}

/// Gate that declines every update
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl BaselineUpdateGate for DeclineAll {
    fn confirm(&self, _hostname: &str, _after: &WalkFile) -> bool {
        false
    }
}
