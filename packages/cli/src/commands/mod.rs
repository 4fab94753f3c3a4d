pub mod migrate;
pub mod new;
pub mod snap;
pub mod validate;

pub use migrate::{migrate, MigrateArgs};
pub use new::{new, NewArgs};
pub use snap::{snap, SnapArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::debug;

fn read_input(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    debug!(path = %path.display(), bytes = source.len(), "Read stored document");
    Ok(source)
}

/// Write to `output` if given, stdout otherwise
fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
