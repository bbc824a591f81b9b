//! Compare two Walks and print the classified report

use crate::pager::Output;
use crate::prompt::StdinPromptGate;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use fsreview_core::report::render_human_summary;
use fsreview_engine::{
    apply_engine_command, ComparisonMode, ComparisonSession, DeclineAll, EngineCommand,
    EngineCommandResult, ModeInputs, UpdateOutcome,
};
use fsreview_store::ReviewStore;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report config with exclusions and rules (.json, .yaml)
    #[arg(long)]
    pub config_file: PathBuf,

    /// Directory holding the host's Walk artifacts
    #[arg(long)]
    pub walk_path: Option<PathBuf>,

    /// Reviews file with the "last known good" baselines
    #[arg(long)]
    pub review_file: Option<PathBuf>,

    /// Host to review; compares its baseline with its newest Walk
    #[arg(long)]
    pub hostname: Option<String>,

    /// Explicit before Walk; omit for a first run
    #[arg(long)]
    pub before_file: Option<PathBuf>,

    /// Explicit after Walk
    #[arg(long)]
    pub after_file: Option<PathBuf>,

    /// Pipe the report through $PAGER
    #[arg(long)]
    pub paginate: bool,

    /// Print per-file deltas
    #[arg(long)]
    pub verbose: bool,

    /// Ask to make the after Walk the new "last known good"
    #[arg(long)]
    pub update_review: bool,
}

impl ReportArgs {
    fn mode_inputs(&self) -> ModeInputs {
        ModeInputs {
            hostname: self.hostname.clone(),
            review_file: self.review_file.clone(),
            walk_path: self.walk_path.clone(),
            before_file: self.before_file.clone(),
            after_file: self.after_file.clone(),
        }
    }

    /// Reviews file an accepted update is written to
    fn update_target(&self, mode: &ComparisonMode) -> Option<PathBuf> {
        match mode {
            ComparisonMode::Baseline { review_file, .. } => Some(review_file.clone()),
            ComparisonMode::Files { .. } => self.review_file.clone(),
        }
    }
}

/// Run one comparison, print it, then optionally update the baseline.
///
/// # Errors
///
/// Mode, config, load and comparison errors, plus output and update
/// failures.
pub fn execute(args: ReportArgs) -> Result<()> {
    let mode = ComparisonMode::resolve(&args.mode_inputs())?;
    let update_target = args.update_target(&mode);
    if args.update_review && update_target.is_none() {
        bail!("--update-review needs --review-file");
    }

    let cmd = EngineCommand::Compare {
        mode,
        report_config: args.config_file.clone(),
        allow_missing_baseline: true,
    };
    let mut session = match apply_engine_command(cmd, &DeclineAll)? {
        EngineCommandResult::Compared(session) => session,
        EngineCommandResult::BaselineUpdate(_) => bail!("compare returned no report"),
    };

    print_report(&session, args.paginate, args.verbose)?;

    match update_target.filter(|_| args.update_review) {
        Some(review_file) => update_review(&mut session, review_file),
        None => {
            println!("not updating reviews file");
            Ok(())
        }
    }
}

fn print_report(session: &ComparisonSession, paginate: bool, verbose: bool) -> Result<()> {
    let report = session
        .report()
        .ok_or_else(|| anyhow!("comparison produced no report"))?;
    let ctx = session
        .summary_context(verbose)
        .ok_or_else(|| anyhow!("comparison has no after walk"))?;
    let text = render_human_summary(report, &ctx);

    let mut out = Output::open(paginate)?;
    out.write_all(text.as_bytes())?;
    out.finish()?;
    Ok(())
}

fn update_review(session: &mut ComparisonSession, review_file: PathBuf) -> Result<()> {
    let store = ReviewStore::open(review_file)?;
    match session.update_baseline(&store, &StdinPromptGate)? {
        UpdateOutcome::Updated(review) => {
            println!(
                "updated \"last known good\" to walk {} in {}",
                review.walk_id,
                store.path().display()
            );
        }
        UpdateOutcome::Declined => println!("not updating reviews file"),
    }
    Ok(())
}
