use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "legacymap")]
#[command(about = "Python 2 legacy-pattern scanner and migration report engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a legacymap.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory for legacy patterns
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Directory/file patterns to exclude
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a prioritized migration report for a directory
    Report {
        /// Directory to analyze
        path: PathBuf,

        /// Directory/file patterns to exclude
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert one file in place via the external rewriter
    Convert {
        /// Python file to convert
        file: PathBuf,

        /// Skip the .py2.bak backup
        #[arg(long)]
        no_backup: bool,

        /// Show the diff without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a converted file: syntax, remaining patterns, runtime risks
    Validate {
        /// Converted Python file to validate
        file: PathBuf,
    },

    /// Compare an original file with its converted counterpart
    Compare {
        /// Original file (or its .py2.bak backup)
        original: PathBuf,

        /// Converted file
        converted: PathBuf,
    },

    /// Serve the tool endpoints over stdio (JSON-RPC)
    Serve,
}
