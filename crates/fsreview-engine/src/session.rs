//! Comparison session state machine.
//!
//! One session covers one comparison:
//!
//! ```text
//! Idle ─load baseline / before / none─▶ BaselineLoaded ─load after─▶ AfterLoaded
//!      ─compare─▶ Reported ─update_baseline─▶ Updated | Declined
//! ```
//!
//! A missing baseline (`NotFound`) leaves the session `Idle` so the caller
//! can choose to continue without a before Walk. Any other load error moves
//! it to `Failed`; nothing further runs.

use crate::gate::BaselineUpdateGate;
use fsreview_core::diff::compute_diff;
use fsreview_core::errors::{ExError, ExErrorKind, FsReviewError, Result};
use fsreview_core::model::Review;
use fsreview_core::report::{aggregate, Report, SummaryContext, WalkHeader};
use fsreview_core::rules::RuleSet;
use fsreview_core::{log_op_end, log_op_error, log_op_start};
use fsreview_core_types::RunContext;
use fsreview_store::{read_latest_walk, read_walk, ReviewStore, WalkFile};
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    BaselineLoaded,
    AfterLoaded,
    Reported,
    Updated,
    Declined,
    Failed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::BaselineLoaded => "baseline_loaded",
            SessionState::AfterLoaded => "after_loaded",
            SessionState::Reported => "reported",
            SessionState::Updated => "updated",
            SessionState::Declined => "declined",
            SessionState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of asking to update the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Review),
    Declined,
}

#[derive(Debug)]
pub struct ComparisonSession {
    ctx: RunContext,
    rules: RuleSet,
    state: SessionState,
    baseline: Option<Review>,
    before: Option<WalkFile>,
    after: Option<WalkFile>,
    report: Option<Report>,
}

impl ComparisonSession {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_context(rules, RunContext::new())
    }

    pub fn with_context(rules: RuleSet, ctx: RunContext) -> Self {
        Self {
            ctx,
            rules,
            state: SessionState::Idle,
            baseline: None,
            before: None,
            after: None,
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Review the before Walk was loaded from, in baseline mode
    pub fn baseline(&self) -> Option<&Review> {
        self.baseline.as_ref()
    }

    pub fn before(&self) -> Option<&WalkFile> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&WalkFile> {
        self.after.as_ref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    fn expect_state(&self, step: &str, expected: SessionState) -> Result<()> {
        if self.state != expected {
            return Err(ExError::from(FsReviewError::SessionOrder {
                step: step.to_string(),
                state: self.state.to_string(),
            })
            .with_session_id(self.ctx.session_id.clone()));
        }
        Ok(())
    }

    /// Record a load failure; `NotFound` keeps the session usable
    fn fail(&mut self, err: ExError) -> ExError {
        if err.kind() != ExErrorKind::NotFound {
            self.state = SessionState::Failed;
        }
        err.with_session_id(self.ctx.session_id.clone())
    }

    /// Load and verify the last known good Walk for `hostname`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the host has no Review; the session stays `Idle`
    /// - `Tamper` / `Decode` / `Io` otherwise; the session is `Failed`
    /// - `InvalidState` if the session is not `Idle`
    pub fn load_baseline(&mut self, store: &ReviewStore, hostname: &str) -> Result<()> {
        self.expect_state("load_baseline", SessionState::Idle)?;
        self.ctx.hostname = Some(hostname.to_string());
        match store.read_last_good_walk(hostname) {
            Ok((review, walk_file)) => {
                self.baseline = Some(review);
                self.before = Some(walk_file);
                self.state = SessionState::BaselineLoaded;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Use an explicit artifact as the before Walk.
    ///
    /// # Errors
    ///
    /// Any [`read_walk`] error; `NotFound` keeps the session `Idle`.
    pub fn load_before(&mut self, path: &Path) -> Result<()> {
        self.expect_state("load_before", SessionState::Idle)?;
        match read_walk(path) {
            Ok(walk_file) => {
                self.before = Some(walk_file);
                self.state = SessionState::BaselineLoaded;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Continue without a before Walk (first run).
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is not `Idle`.
    pub fn without_before(&mut self) -> Result<()> {
        self.expect_state("without_before", SessionState::Idle)?;
        self.state = SessionState::BaselineLoaded;
        Ok(())
    }

    /// Load an explicit artifact as the after Walk.
    ///
    /// # Errors
    ///
    /// Any [`read_walk`] error moves the session to `Failed`.
    pub fn load_after(&mut self, path: &Path) -> Result<()> {
        self.expect_state("load_after", SessionState::BaselineLoaded)?;
        let loaded = read_walk(path);
        self.set_after(loaded)
    }

    /// Load the newest Walk for `hostname` under `walk_path` as the after Walk.
    ///
    /// # Errors
    ///
    /// `NotFound` if no artifact matches; any error moves the session to
    /// `Failed`.
    pub fn load_latest_after(&mut self, hostname: &str, walk_path: &Path) -> Result<()> {
        self.expect_state("load_latest_after", SessionState::BaselineLoaded)?;
        let loaded = read_latest_walk(hostname, walk_path);
        self.set_after(loaded)
    }

    fn set_after(&mut self, loaded: Result<WalkFile>) -> Result<()> {
        match loaded {
            Ok(walk_file) => {
                self.after = Some(walk_file);
                self.state = SessionState::AfterLoaded;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e.with_session_id(self.ctx.session_id.clone()))
            }
        }
    }

    /// Diff, classify and aggregate.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless both sides are loaded
    /// - `InvalidInput` / `DeterminismViolation` from the diff engine
    pub fn compare(&mut self) -> Result<&Report> {
        self.expect_state("compare", SessionState::AfterLoaded)?;
        let start = Instant::now();
        let session_id = self.ctx.session_id.to_string();
        log_op_start!("compare", session_id = session_id.as_str());

        match self.run_compare() {
            Ok(report) => {
                log_op_end!(
                    "compare",
                    duration_ms = start.elapsed().as_millis() as u64,
                    session_id = session_id.as_str(),
                    diff_len = report.diff.added.len()
                        + report.diff.removed.len()
                        + report.diff.modified.len()
                );
                self.state = SessionState::Reported;
                Ok(self.report.insert(report))
            }
            Err(e) => {
                log_op_error!(
                    "compare",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    session_id = session_id.as_str()
                );
                self.state = SessionState::Failed;
                Err(e.with_session_id(self.ctx.session_id.clone()))
            }
        }
    }

    fn run_compare(&self) -> Result<Report> {
        let after = self.after.as_ref().ok_or_else(|| {
            ExError::new(ExErrorKind::Internal)
                .with_op("compare")
                .with_message("after walk missing in after_loaded state")
        })?;
        let before = self.before.as_ref().map(|wf| &wf.walk);

        let diff = compute_diff(before, &after.walk)?;
        let classification = self.rules.classify(&diff);
        tracing::debug!(
            before_files = diff.before_files,
            after_files = diff.after_files,
            excluded = classification.excluded.len(),
            unmatched = classification.unmatched.len(),
            "diff classified"
        );
        Ok(aggregate(&diff, &classification))
    }

    /// Summary header data for the loaded Walks
    pub fn summary_context(&self, verbose: bool) -> Option<SummaryContext> {
        let after = self.after.as_ref()?;
        Some(SummaryContext {
            before: self.before.as_ref().map(|wf| WalkHeader::from_walk(&wf.walk)),
            after: WalkHeader::from_walk(&after.walk),
            verbose,
        })
    }

    /// Ask `gate`, then make the after Walk the host's new baseline.
    ///
    /// The host is the one the baseline was loaded for, or else the after
    /// Walk's own hostname.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless a report was produced
    /// - any [`ReviewStore::update_baseline`] error; the store is unchanged
    pub fn update_baseline(
        &mut self,
        store: &ReviewStore,
        gate: &dyn BaselineUpdateGate,
    ) -> Result<UpdateOutcome> {
        self.expect_state("update_baseline", SessionState::Reported)?;
        let after = self.after.as_ref().ok_or_else(|| {
            ExError::new(ExErrorKind::Internal)
                .with_op("update_baseline")
                .with_message("after walk missing in reported state")
        })?;
        let hostname = self
            .ctx
            .hostname
            .clone()
            .unwrap_or_else(|| after.walk.hostname.clone());

        if !gate.confirm(&hostname, after) {
            tracing::info!(hostname = hostname.as_str(), "baseline update declined");
            self.state = SessionState::Declined;
            return Ok(UpdateOutcome::Declined);
        }

        let review = store
            .update_baseline(&hostname, after)
            .map_err(|e| e.with_session_id(self.ctx.session_id.clone()))?;
        self.state = SessionState::Updated;
        Ok(UpdateOutcome::Updated(review))
    }
}
