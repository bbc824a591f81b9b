//! Operating modes.

use fsreview_core::errors::{ExError, FsReviewError, Result};
use std::path::PathBuf;

/// Raw, optional inputs as a front end collects them
#[derive(Debug, Clone, Default)]
pub struct ModeInputs {
    pub hostname: Option<String>,
    pub review_file: Option<PathBuf>,
    pub walk_path: Option<PathBuf>,
    pub before_file: Option<PathBuf>,
    pub after_file: Option<PathBuf>,
}

/// How the before and after Walks are located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Last known good from the Review Store against the newest Walk found
    /// under `walk_path`
    Baseline {
        hostname: String,
        review_file: PathBuf,
        walk_path: PathBuf,
    },
    /// Explicit artifacts; no `before` means first-run comparison
    Files {
        before: Option<PathBuf>,
        after: PathBuf,
    },
}

impl ComparisonMode {
    /// Pick the mode from the supplied inputs.
    ///
    /// # Errors
    ///
    /// `ConfigError` if inputs for both modes are present, or if neither
    /// mode is complete.
    pub fn resolve(inputs: &ModeInputs) -> Result<Self> {
        let ModeInputs {
            hostname,
            review_file,
            walk_path,
            before_file,
            after_file,
        } = inputs;
        let hostname = hostname.as_ref().filter(|h| !h.is_empty());
        // A review file alone is allowed in file mode as the update target
        let any_baseline = hostname.is_some() || walk_path.is_some();
        let any_files = before_file.is_some() || after_file.is_some();

        if let (Some(hostname), Some(review_file), Some(walk_path)) =
            (hostname, review_file, walk_path)
        {
            if any_files {
                return Err(ExError::from(FsReviewError::ConflictingModes).with_op("resolve_mode"));
            }
            return Ok(ComparisonMode::Baseline {
                hostname: hostname.clone(),
                review_file: review_file.clone(),
                walk_path: walk_path.clone(),
            });
        }

        match after_file {
            Some(after) if !any_baseline => Ok(ComparisonMode::Files {
                before: before_file.clone(),
                after: after.clone(),
            }),
            Some(_) => Err(ExError::from(FsReviewError::ConflictingModes).with_op("resolve_mode")),
            None => Err(ExError::from(FsReviewError::MissingModeInputs).with_op("resolve_mode")),
        }
    }

    pub fn hostname(&self) -> Option<&str> {
        match self {
            ComparisonMode::Baseline { hostname, .. } => Some(hostname),
            ComparisonMode::Files { .. } => None,
        }
    }
}
