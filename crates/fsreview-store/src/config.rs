//! Configuration artifacts.
//!
//! ReportConfig and Policy files are decoded with the codec their extension
//! selects and validated before they are handed out.

use crate::errors::{decode_error, io_error, Result};
use fsreview_core::codec::CodecKind;
use fsreview_core::errors::{ExError, ExErrorKind};
use fsreview_core::model::{Policy, ReportConfig};
use fsreview_core::rules::RuleSet;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn read_config<T: Serialize + DeserializeOwned>(op: &str, path: &Path) -> Result<T> {
    let codec = CodecKind::for_path(path)?;
    // A missing config is a configuration problem, never a first-run signal
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExError::new(ExErrorKind::ConfigError)
            .with_op(op)
            .with_path(path.display().to_string())
            .with_message("config file does not exist"),
        _ => io_error(op, path, e),
    })?;
    codec.decode(&bytes).map_err(|e| decode_error(op, path, e))
}

/// Load a ReportConfig and compile its rules.
///
/// Compilation happens here so a malformed rule is rejected before any
/// comparison starts.
///
/// # Errors
///
/// - `ConfigError` if the file does not exist, has a bad version or a
///   relative exclusion prefix
/// - `Io` if the file cannot be read
/// - `Decode` if it does not parse
/// - `RuleConfig` for a malformed rule
pub fn load_report_config(path: &Path) -> Result<(ReportConfig, RuleSet)> {
    let config: ReportConfig = read_config("load_report_config", path)?;
    let rules = RuleSet::compile(&config).map_err(|e| e.with_path(path.display().to_string()))?;
    tracing::debug!(
        path = %path.display(),
        rules = rules.rules().len(),
        exclusions = config.exclude_pfx.len(),
        "report config loaded"
    );
    Ok((config, rules))
}

/// Load and validate a walk Policy.
///
/// # Errors
///
/// - `ConfigError` if the file does not exist, has a bad version, an empty
///   include list or a relative prefix
/// - `Io` if the file cannot be read
/// - `Decode` if it does not parse
pub fn load_policy(path: &Path) -> Result<Policy> {
    let policy: Policy = read_config("load_policy", path)?;
    policy
        .validate()
        .map_err(|e| ExError::from(e).with_op("load_policy").with_path(path.display().to_string()))?;
    Ok(policy)
}
