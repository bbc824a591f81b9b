//! Interactive confirmation before a baseline update.

use fsreview_engine::BaselineUpdateGate;
use fsreview_store::WalkFile;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Do you want to update the \"last known good\" to this [y/N]: ";

/// Only a lone `y` (any case, surrounding whitespace ignored) confirms
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Asks on stdout and reads the answer from stdin
pub struct StdinPromptGate;

impl BaselineUpdateGate for StdinPromptGate {
    fn confirm(&self, hostname: &str, after: &WalkFile) -> bool {
        print!("{}", PROMPT);
        if let Err(e) = io::stdout().flush() {
            tracing::warn!(error = %e, "failed to flush prompt");
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => {
                let confirmed = is_confirmation(&answer);
                tracing::debug!(
                    hostname = hostname,
                    walk_id = after.walk.id.as_str(),
                    confirmed,
                    "baseline update prompt answered"
                );
                confirmed
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}
