use super::{read_input, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use drawboard_document::{migrate_str, MigrationSource};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Stored document (JSON, any version)
    pub input: PathBuf,

    /// Where to write the migrated document (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn migrate(args: MigrateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_input(&args.input)?;

    let migration = migrate_str(&source);

    let label = match migration.source {
        MigrationSource::Current => "current".green(),
        MigrationSource::Legacy => "legacy (version 1)".yellow(),
        MigrationSource::Fallback => "unreadable, replaced with an empty document".red(),
    };
    eprintln!("{} {}: {}", "🔄".bright_blue(), args.input.display(), label);

    let json = config.to_json(&migration.document)?;
    write_output(args.output.as_deref(), &json)
}
