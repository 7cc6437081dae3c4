//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lantern_core::config::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "lantern")]
#[command(about = "Performance analyzer for Laravel applications", version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). LANTERN_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a Laravel application
    Analyze(AnalyzeArgs),
    /// List every available analyzer
    List,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Root of the Laravel application
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Override the environment read from app.env
    #[arg(long = "env", value_name = "ENV")]
    pub environment: Option<String>,

    /// Output format: text or json
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ReportFormat>,

    /// Run only these analyzers (repeatable)
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// Skip these analyzers (repeatable)
    #[arg(long = "exclude", value_name = "ID")]
    pub exclude: Vec<String>,

    /// Base URL used to probe compiled assets
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Configuration file (default: <path>/lantern.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with status 1 when any analyzer fails
    #[arg(long)]
    pub ci: bool,

    /// With --ci, also fail on warnings
    #[arg(long)]
    pub fail_on_warning: bool,
}

fn parse_format(value: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse_str(value).ok_or_else(|| format!("unknown format '{value}' (expected text or json)"))
}
