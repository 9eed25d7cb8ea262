//! Command-line argument definitions for the Enclave CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the optional report
//! and auto-fix outputs, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Enclave scene renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene (JSON)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Write the diagnostic report (JSON) to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Write the scene with high-confidence fixes applied (JSON) to this path
    #[arg(long)]
    pub fix: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Exit with a failure status when any error diagnostic is produced
    #[arg(long)]
    pub deny_errors: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
