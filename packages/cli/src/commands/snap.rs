use super::read_input;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use drawboard_document::{migrate_str, DiagramDocument, NodeKind, NodeRecord, Position};
use drawboard_snap::{compute_snap_on_page, Guide, GuideAxis};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SnapArgs {
    /// Stored document to snap against (an empty page if omitted)
    pub input: Option<PathBuf>,

    /// Node being dragged (a default rectangle if omitted)
    #[arg(short, long)]
    pub node: Option<String>,

    /// Proposed x of the node's top-left corner
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Proposed y of the node's top-left corner
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,

    /// Override the page's grid size
    #[arg(long)]
    pub grid: Option<f64>,

    /// Disable grid snapping (guides are still reported)
    #[arg(long)]
    pub no_grid: bool,

    /// Alignment tolerance in screen pixels (overrides config)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuideReport<'a> {
    #[serde(flatten)]
    guide: &'a Guide,
    screen: f64,
}

pub fn snap(args: SnapArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let mut doc = match &args.input {
        Some(path) => migrate_str(&read_input(path)?).document,
        None => {
            let mut doc = DiagramDocument::new_empty();
            for page in &mut doc.pages {
                page.settings.grid_size = config.snap.default_grid_size;
            }
            doc
        }
    };

    let page = doc
        .active_page_mut()
        .ok_or_else(|| anyhow!("Document has no active page"))?;

    if let Some(grid) = args.grid {
        page.settings.grid_size = grid;
    }
    if args.no_grid {
        page.settings.snap_enabled = false;
    }

    let mut moving = match &args.node {
        Some(id) => page
            .node(id)
            .cloned()
            .ok_or_else(|| anyhow!("Node '{}' is not on the active page '{}'", id, page.id))?,
        None => NodeRecord::new("cursor", NodeKind::Rectangle, Position::default(), page.active_layer_id.clone()),
    };
    moving.position = Position::new(args.x, args.y);

    let tolerance = args.tolerance.unwrap_or(config.snap.tolerance_px);
    let result = compute_snap_on_page(page, &moving, tolerance);

    let guides: Vec<GuideReport> = result
        .guides
        .iter()
        .map(|guide| GuideReport {
            guide,
            screen: guide.to_screen(&page.viewport),
        })
        .collect();

    if args.format == "json" {
        let report = serde_json::json!({
            "nodeId": moving.id,
            "position": result.position,
            "guides": guides,
        });
        println!("{}", config.to_json(&report)?);
        return Ok(());
    }

    println!(
        "{} {} → ({}, {})",
        "📐".bright_blue(),
        moving.id.bright_white(),
        result.position.x.to_string().cyan(),
        result.position.y.to_string().cyan()
    );

    if guides.is_empty() {
        println!("   No alignment guides");
    }
    for report in &guides {
        let axis = match report.guide.axis {
            GuideAxis::Vertical => "x",
            GuideAxis::Horizontal => "y",
        };
        println!(
            "   {} {} = {} (screen {}) from node {}",
            "guide".green(),
            axis,
            report.guide.coordinate,
            report.screen,
            report.guide.node_id
        );
    }

    Ok(())
}
