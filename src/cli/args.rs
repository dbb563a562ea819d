use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seamcheck",
    version,
    about = "Cross-component interface dependency checker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Show debug logs on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Log filter, e.g. `info` or `seamcheck_core=debug`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the interface graph and report dependency issues
    Check {
        /// Project root to analyze
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Configuration file (defaults to `<root>/seamcheck.toml`)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Compare interfaces against this revision and flag removed symbols
        #[arg(long, value_name = "REV")]
        since: Option<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
        /// Write the report to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List components with the interfaces they provide and require
    Components {
        #[arg(long, default_value = ".")]
        root: PathBuf,
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}
