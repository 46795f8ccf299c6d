// Command-line interface definitions for keyscribe
//
// This module is separate so it can be used by both the binary (main.rs)
// and build.rs for generating man pages.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "keyscribe")]
#[command(author, version, about = "Reconstruct typed sentences from keyboard recorder logs")]
#[command(long_about = "
Keyscribe reads a keyboard activity log (one JSON record per line) and
reconstructs the lines of text that were actually typed.

Shift is applied to the next letter only, backspace removes the previous
character, Enter ends a line, and control keys are dropped. Blank lines
are discarded.

USAGE:
  keyscribe parse logs/activity_1700000000.json
  keyscribe parse activity.json --format text --stdout
")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconstruct sentences from a recorder log
    Parse {
        /// Path to the recorder log
        file: std::path::PathBuf,

        /// Directory for the result file (default: next to the log)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<std::path::PathBuf>,

        /// Output format: "json" (default) or "text"
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Print the result instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Show current configuration
    Config {
        /// Print a commented default config file instead
        #[arg(long)]
        default: bool,
    },
}
