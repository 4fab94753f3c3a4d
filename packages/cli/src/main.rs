mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{migrate, new, snap, validate, MigrateArgs, NewArgs, SnapArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Drawboard CLI - inspect, migrate and snap stored diagram documents
#[derive(Parser, Debug)]
#[command(name = "drawboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log migration and normalization details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a fresh empty document
    New(NewArgs),

    /// Convert a stored document of any version into the current shape
    Migrate(MigrateArgs),

    /// Check a stored document against the current schema
    Validate(ValidateArgs),

    /// Compute the snapped position and alignment guides for a dragged node
    Snap(SnapArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::New(args) => new(args, &cwd),
        Command::Migrate(args) => migrate(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Snap(args) => snap(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
