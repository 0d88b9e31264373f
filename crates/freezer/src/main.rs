//! Freezer CLI - render web-app templates to a static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "freezer")]
#[command(about = "Render web-app templates to a standalone static site")]
#[command(version)]
pub struct Cli {
    /// Path to freezer.toml config file
    #[arg(short, long, default_value = "freezer.toml")]
    config: PathBuf,

    /// Output directory (defaults to config or "site")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    commands::build::run(&cli.config, cli.output)
}
