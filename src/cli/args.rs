//! Command line argument parsing for the payload-synonym CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// payload-synonym - expand payload-encoded synonyms in a token dump
#[derive(Parser, Debug, Clone)]
#[command(name = "payload-synonym")]
#[command(about = "Expand payload-encoded synonyms into same-position tokens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PayloadSynonymArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PayloadSynonymArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the payload synonym filter over a JSON lines token dump
    Expand(ExpandArgs),
}

/// Arguments for expanding a token dump
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Token file, one JSON token per line ("-" reads stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Filter configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Remove the payload from the original token
    #[arg(short, long)]
    pub remove: bool,

    /// Split the payload into several synonym tokens
    #[arg(short, long)]
    pub multiple: bool,

    /// Delimiter separating synonyms in the payload
    #[arg(short, long, env = "PAYLOAD_SYNONYM_DELIMITER")]
    pub delimiter: Option<String>,
}

impl ExpandArgs {
    /// Check if tokens are read from standard input
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON lines output
    Json,
}
