//! Render every document of one or more builds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use loadout_core::document::format_stat;
use loadout_core::{Build, BuildReport, DocumentOwner, EngineError, render_builds};
use serde::Serialize;

use super::{OutputFormat, describe, load_builds, load_catalogue};

/// Render every document of one or more builds
#[derive(Parser)]
pub struct Render {
    /// Build file (JSON or RON, one build or a list)
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Include zero-valued stats in the summary
    #[arg(long)]
    all_stats: bool,
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    build: &'a Build,
    fingerprint: Option<String>,
    report: Option<&'a BuildReport>,
    error: Option<String>,
}

impl Render {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let catalogue = load_catalogue(data_dir)?;
        let builds = load_builds(&self.build)?;
        let reports = render_builds(&catalogue, &builds);

        match self.format {
            OutputFormat::Summary => {
                for (index, (build, report)) in builds.iter().zip(&reports).enumerate() {
                    print_summary(index, build, report, self.all_stats);
                }
            }
            OutputFormat::Json => {
                let output: Vec<RenderOutput<'_>> = builds
                    .iter()
                    .zip(&reports)
                    .map(|(build, report)| RenderOutput {
                        build,
                        fingerprint: report.as_ref().ok().map(|r| hex::encode(r.fingerprint)),
                        report: report.as_ref().ok(),
                        error: report.as_ref().err().map(ToString::to_string),
                    })
                    .collect();
                let json = serde_json::to_string_pretty(&output)
                    .context("Failed to serialize render output to JSON")?;
                println!("{}", json);
            }
            OutputFormat::Debug => println!("{:#?}", reports),
        }

        Ok(())
    }
}

fn print_summary(
    index: usize,
    build: &Build,
    report: &Result<BuildReport, EngineError>,
    all_stats: bool,
) {
    println!(
        "{} {}",
        style(format!("=== Build #{index} ===")).bold().green(),
        describe(build)
    );

    let report = match report {
        Ok(report) => report,
        Err(err) => {
            println!(
                "  {} {} ({})",
                style("✗").red(),
                err,
                style(err.error_code()).dim()
            );
            println!();
            return;
        }
    };

    println!(
        "{} {}",
        style("Fingerprint:").bold().cyan(),
        hex::encode(report.fingerprint)
    );
    if !build.active_effects.is_empty() {
        let effects: Vec<&str> = build.active_effects.iter().map(|e| e.as_str()).collect();
        println!("{} {}", style("Effects:").bold().cyan(), effects.join(", "));
    }
    println!();

    println!("{}", style("Stats:").bold().yellow());
    for (key, value) in &report.stats {
        if all_stats || *value != 0.0 {
            println!("  {:<22} {}", key.label(), format_stat(*key, *value));
        }
    }
    println!();

    for doc in &report.documents {
        let owner = match &doc.owner {
            DocumentOwner::Character(id) => id.to_string(),
            DocumentOwner::Weapon(id) => id.to_string(),
        };
        println!(
            "{} {}",
            style(format!("{}:", doc.title)).bold().yellow(),
            style(owner).dim()
        );
        for field in &doc.fields {
            match field {
                Ok(field) => {
                    let tag = field
                        .effective_type
                        .map(|t| format!(" [{t}]"))
                        .unwrap_or_default();
                    println!("  {}: {}{}", field.label, field.text, style(tag).dim());
                }
                Err(failure) => println!(
                    "  {} {}: {} ({})",
                    style("✗").red(),
                    failure.label,
                    failure.error,
                    style(failure.error.error_code()).dim()
                ),
            }
        }
    }
    println!();
}
