//! fsreview CLI
//!
//! Compares two file-system Walks, prints the classified report and
//! optionally promotes the newer Walk to the host's "last known good".

use clap::{Parser, ValueEnum};
use fsreview_core::logging_facility::{init, Profile};

mod commands;
mod pager;
mod prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn profile(self) -> Profile {
        match self {
            LogFormat::Text => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fsreview")]
#[command(about = "Review file-system walks against a known good baseline", long_about = None)]
struct Cli {
    #[command(flatten)]
    report: commands::report::ReportArgs,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum, default_value = "text", env = "FSREVIEW_LOG_FORMAT")]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_format.profile());

    if let Err(e) = commands::report::execute(cli.report) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
