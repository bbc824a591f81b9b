//! Engine-level commands.

use crate::gate::BaselineUpdateGate;
use crate::mode::ComparisonMode;
use crate::session::{ComparisonSession, UpdateOutcome};
use fsreview_core::errors::{ExErrorKind, Result};
use fsreview_core::rules::RuleSet;
use fsreview_core::{log_op_end, log_op_error, log_op_start};
use fsreview_core_types::RunContext;
use fsreview_store::{load_report_config, read_walk, ReviewStore};
use std::path::PathBuf;
use std::time::Instant;

/// Engine-level commands that touch the filesystem.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Run one comparison and stop at `Reported`.
    Compare {
        mode: ComparisonMode,
        report_config: PathBuf,
        /// Baseline mode only: treat a host without a Review as a first run
        /// instead of failing with `NotFound`.
        allow_missing_baseline: bool,
    },
    /// Accept an artifact as a host's baseline without comparing.
    UpdateBaseline {
        hostname: String,
        review_file: PathBuf,
        walk_file: PathBuf,
    },
}

/// Result of applying an engine command.
#[derive(Debug)]
pub enum EngineCommandResult {
    /// Session in `Reported` state; the caller may render it and then ask for
    /// a baseline update.
    Compared(Box<ComparisonSession>),
    BaselineUpdate(UpdateOutcome),
}

/// Apply an engine command.
///
/// `gate` is only consulted by `UpdateBaseline`.
///
/// # Errors
///
/// Configuration, load, tamper and comparison errors propagate unchanged.
pub fn apply_engine_command(
    cmd: EngineCommand,
    gate: &dyn BaselineUpdateGate,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Compare {
            mode,
            report_config,
            allow_missing_baseline,
        } => {
            let (_, rules) = load_report_config(&report_config)?;
            let session = compare(mode, rules, allow_missing_baseline)?;
            Ok(EngineCommandResult::Compared(Box::new(session)))
        }
        EngineCommand::UpdateBaseline {
            hostname,
            review_file,
            walk_file,
        } => {
            let start = Instant::now();
            log_op_start!("accept_baseline", hostname = hostname.as_str());
            let result = accept_baseline(&hostname, &review_file, &walk_file, gate);
            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("accept_baseline", duration_ms = duration_ms),
                Err(e) => log_op_error!("accept_baseline", e.clone(), duration_ms = duration_ms),
            }
            result.map(EngineCommandResult::BaselineUpdate)
        }
    }
}

fn compare(
    mode: ComparisonMode,
    rules: RuleSet,
    allow_missing_baseline: bool,
) -> Result<ComparisonSession> {
    match mode {
        ComparisonMode::Baseline {
            hostname,
            review_file,
            walk_path,
        } => {
            let ctx = RunContext::new().with_hostname(hostname.as_str());
            let mut session = ComparisonSession::with_context(rules, ctx);
            let store = ReviewStore::open(review_file)?;
            match session.load_baseline(&store, &hostname) {
                Ok(()) => {}
                Err(e) if e.kind() == ExErrorKind::NotFound && allow_missing_baseline => {
                    tracing::info!(
                        hostname = hostname.as_str(),
                        "no last known good baseline, comparing without before walk"
                    );
                    session.without_before()?;
                }
                Err(e) => return Err(e),
            }
            session.load_latest_after(&hostname, &walk_path)?;
            session.compare()?;
            Ok(session)
        }
        ComparisonMode::Files { before, after } => {
            let mut session = ComparisonSession::new(rules);
            match before {
                Some(path) => session.load_before(&path)?,
                None => session.without_before()?,
            }
            session.load_after(&after)?;
            session.compare()?;
            Ok(session)
        }
    }
}

fn accept_baseline(
    hostname: &str,
    review_file: &std::path::Path,
    walk_file: &std::path::Path,
    gate: &dyn BaselineUpdateGate,
) -> Result<UpdateOutcome> {
    let store = ReviewStore::open(review_file)?;
    let walk = read_walk(walk_file)?;
    if !gate.confirm(hostname, &walk) {
        return Ok(UpdateOutcome::Declined);
    }
    store.update_baseline(hostname, &walk).map(UpdateOutcome::Updated)
}
