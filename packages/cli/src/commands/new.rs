use super::write_output;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use drawboard_document::DiagramDocument;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Where to write the document (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let mut doc = DiagramDocument::new_empty();
    for page in &mut doc.pages {
        page.settings.grid_size = config.snap.default_grid_size;
    }

    let json = config.to_json(&doc)?;
    write_output(args.output.as_deref(), &json)
}
