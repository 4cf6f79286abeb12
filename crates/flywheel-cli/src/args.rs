//! Command-line argument definitions for the Flywheel inspector.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document, outline detail, and
//! logging verbosity.

use clap::Parser;

/// Command-line arguments for the Flywheel document inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input state-machine document (JSON interchange format)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Append committed identifiers to outline lines
    #[arg(long)]
    pub show_ids: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
