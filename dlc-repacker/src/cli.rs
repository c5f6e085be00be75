//! Root CLI structure for dlc-repacker

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dlc-repacker")]
#[command(about = "Aligns the compatibility version of installed DLC archives", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game installation folder (defaults to the current directory)
    pub folder: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter derived from the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
