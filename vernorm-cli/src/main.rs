//! vernorm CLI - expand date-only migration versions in place

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{check, fix};

/// vernorm - give every migration a unique 14-digit version
#[derive(Parser)]
#[command(name = "vernorm", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Migrations directory (overrides vernorm.json and VERNORM_MIGRATIONS_DIR)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename date-only migrations to unique timestamps (default)
    Fix,

    /// Report version groups without renaming anything
    Check,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "vernorm=debug,vernorm_core=debug"
    } else {
        "vernorm=warn,vernorm_core=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Fix) {
        Commands::Fix => fix::run(cli.dir, cli.json),
        Commands::Check => check::run(cli.dir, cli.json),
    }
}
