//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Per-file time tracker.
///
/// Tracks how long each file stays active in the editor and keeps a running
/// total per file.
#[derive(Debug, Parser)]
#[command(name = "ft", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Track the active file from focus events read on stdin.
    ///
    /// One command per line: `focus <path>`, `blur`, `panel`, `sort`,
    /// `reset [path]`, `export [dest]`, `export-file <path>`, `chart`,
    /// `status`, `quit`.
    Watch {
        /// Print the status line on every tick.
        #[arg(long)]
        status: bool,
    },

    /// List tracked files with their totals.
    Panel {
        /// Sort by ascending total instead of descending.
        #[arg(long)]
        ascending: bool,
    },

    /// Reset a file's tracked time to zero.
    Reset {
        /// Absolute path of the file.
        path: String,
    },

    /// Export tracked time as JSON.
    Export {
        /// Export only this file.
        #[arg(long)]
        file: Option<String>,

        /// Destination file. Prompts when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a bar chart of the files with the most time.
    Chart {
        /// Number of files to show.
        #[arg(long)]
        top: Option<usize>,
    },

    /// Show database location and totals.
    Status,
}
