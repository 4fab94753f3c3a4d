use super::read_input;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use drawboard_document::{check_references, validate_current, ReferenceIssue};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Stored document (JSON)
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    valid: bool,
    error: Option<String>,
    reference_issues: Vec<ReferenceIssue>,
}

pub fn validate(args: ValidateArgs, _cwd: &str) -> Result<()> {
    let source = read_input(&args.input)?;
    let value: serde_json::Value = serde_json::from_str(&source)?;

    let report = match validate_current(&value) {
        Ok(doc) => Report {
            valid: true,
            error: None,
            reference_issues: check_references(&doc),
        },
        Err(e) => Report {
            valid: false,
            error: Some(e.to_string()),
            reference_issues: Vec::new(),
        },
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&args.input, &report);
    }

    if report.valid {
        Ok(())
    } else {
        Err(anyhow!("{} is not a current document", args.input.display()))
    }
}

fn print_text(input: &std::path::Path, report: &Report) {
    println!("{}", input.display());

    if let Some(error) = &report.error {
        println!("  {} {}", "error".red().bold(), error);
        return;
    }

    if report.reference_issues.is_empty() {
        println!("  {} Valid current document", "✓".green());
        return;
    }

    println!(
        "  {} Valid shape, {} dangling reference(s):",
        "⚠️".yellow(),
        report.reference_issues.len()
    );
    for issue in &report.reference_issues {
        let note = if issue.is_repairable() {
            "repaired on load"
        } else {
            "kept, not rendered"
        };
        println!("    {} {} ({})", "warning".yellow().bold(), issue, note.dimmed());
    }
}
