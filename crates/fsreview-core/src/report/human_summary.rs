//! Human-readable summary renderer for reports.

use crate::diff::model::DiffEntry;
use crate::model::Walk;
use crate::report::aggregate::Report;
use chrono::{DateTime, Utc};

/// Notice printed when the comparison has no before side
pub const NO_BEFORE_NOTICE: &str = "No before walk found. Using after walk only.";

/// Identity of one Walk as shown in the summary header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkHeader {
    pub id: String,
    pub hostname: String,
    pub start_walk: DateTime<Utc>,
    pub stop_walk: DateTime<Utc>,
    pub files: usize,
}

impl WalkHeader {
    pub fn from_walk(walk: &Walk) -> Self {
        Self {
            id: walk.id.clone(),
            hostname: walk.hostname.clone(),
            start_walk: walk.start_walk,
            stop_walk: walk.stop_walk,
            files: walk.files.len(),
        }
    }
}

/// What the renderer needs besides the Report itself
#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub before: Option<WalkHeader>,
    pub after: WalkHeader,
    /// Print per-file deltas instead of paths only
    pub verbose: bool,
}

/// Render a plain-text summary of a [`Report`].
///
/// A pure projection: everything printed is already in the Report or the
/// context.
pub fn render_human_summary(report: &Report, ctx: &SummaryContext) -> String {
    let mut out = String::new();

    // Walk header
    match &ctx.before {
        Some(before) => push_walk_header(&mut out, "Before", before),
        None => {
            out.push_str(NO_BEFORE_NOTICE);
            out.push('\n');
        }
    }
    push_walk_header(&mut out, "After", &ctx.after);
    out.push('\n');

    // Rule summary
    out.push_str("Rule summary:\n");
    if report.rule_results.is_empty() {
        out.push_str("  (no rules configured)\n");
    }
    for result in &report.rule_results {
        match &result.description {
            Some(desc) => out.push_str(&format!(
                "  {} ({}): {} matched\n",
                result.rule,
                desc,
                result.entries.len()
            )),
            None => out.push_str(&format!(
                "  {}: {} matched\n",
                result.rule,
                result.entries.len()
            )),
        }
        for entry in &result.entries {
            out.push_str(&format!("    {} {}\n", entry.kind(), entry.path()));
        }
    }
    out.push('\n');

    // Diff summary
    out.push_str("Diff summary:\n");
    push_bucket(&mut out, "Added", &report.diff.added, ctx.verbose);
    push_bucket(&mut out, "Removed", &report.diff.removed, ctx.verbose);
    push_bucket(&mut out, "Modified", &report.diff.modified, ctx.verbose);
    push_bucket(&mut out, "Unmatched", &report.unmatched, false);
    out.push('\n');

    // Metrics
    out.push_str("Metrics:\n");
    for (name, value) in report.counter.iter() {
        out.push_str(&format!("[{:<30}] = {:>6}\n", name, value));
    }

    out
}

fn push_walk_header(out: &mut String, label: &str, header: &WalkHeader) {
    out.push_str(&format!(
        "{} walk: {} (host {}, {} files)\n  started {}  stopped {}\n",
        label,
        header.id,
        header.hostname,
        header.files,
        header.start_walk.to_rfc3339(),
        header.stop_walk.to_rfc3339(),
    ));
}

fn push_bucket(out: &mut String, label: &str, entries: &[DiffEntry], verbose: bool) {
    out.push_str(&format!("  {} ({}):\n", label, entries.len()));
    for entry in entries {
        out.push_str(&format!("    {}\n", entry.path()));
        if verbose {
            push_entry_detail(out, entry);
        }
    }
}

fn push_entry_detail(out: &mut String, entry: &DiffEntry) {
    match entry {
        DiffEntry::Added { file, .. } | DiffEntry::Removed { file, .. } => {
            out.push_str(&format!(
                "      size: {}  mode: {:o}\n",
                file.info.size, file.info.mode
            ));
            for fp in &file.fingerprints {
                out.push_str(&format!("      fingerprint[{}]: {}\n", fp.method, fp.value));
            }
        }
        DiffEntry::Modified { deltas, .. } => {
            for delta in deltas {
                out.push_str(&format!("      {}\n", delta));
            }
        }
    }
}
