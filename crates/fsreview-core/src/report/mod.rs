//! Report aggregation and presentation.

pub mod aggregate;
pub mod counter;
pub mod human_summary;

pub use aggregate::{aggregate, Report, ReportDiff};
pub use counter::Counter;
pub use human_summary::{render_human_summary, SummaryContext, WalkHeader};
