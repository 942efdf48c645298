//! Command-line interface definitions for Iconsync.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Iconsync - typed React icon components from a directory of SVGs
#[derive(Parser, Debug)]
#[command(name = "iconsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to iconsync.toml configuration file
    #[arg(short, long, global = true, env = "ICONSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v, -vv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default filter directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate icon components (default when no command is given)
    Generate(GenerateArgs),

    /// Initialize a new iconsync.toml configuration file
    Init(InitArgs),

    /// Validate configuration and the icons directory
    Validate(ValidateArgs),

    /// Display discovered icons and the resolved configuration
    Info(InfoArgs),
}

// ============================================================================
// Generate Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Skip the formatter run
    #[arg(long)]
    pub no_format: bool,

    /// Icons directory override (overrides config file)
    #[arg(long)]
    pub icons: Option<PathBuf>,

    /// Output root override (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the generation report to stdout
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Pretty,
    /// JSON output
    Json,
}

// ============================================================================
// Init Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing iconsync.toml if present
    #[arg(short, long)]
    pub force: bool,

    /// Initialize with minimal configuration
    #[arg(long)]
    pub minimal: bool,
}

// ============================================================================
// Validate Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Treat invalid component identifiers as errors instead of warnings
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Info Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Show discovered icons
    #[arg(long)]
    pub icons: bool,

    /// Show configuration values
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: InfoFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InfoFormat {
    Pretty,
    Json,
}
