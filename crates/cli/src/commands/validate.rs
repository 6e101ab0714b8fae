//! Validate the data directory and list every issue found.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use loadout_content::ContentFactory;
use loadout_core::ValidationReport;

/// Load and validate the data directory
#[derive(Parser)]
pub struct Validate {}

impl Validate {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        println!(
            "{} {}",
            style("Data Directory:").bold().cyan(),
            data_dir.display()
        );

        let catalogue = match ContentFactory::new(data_dir).load_catalogue() {
            Ok(catalogue) => catalogue,
            Err(err) => {
                if let Some(report) = err.downcast_ref::<ValidationReport>() {
                    print_report(report);
                }
                return Err(err);
            }
        };

        println!("{}", style("=== Catalogue OK ===").bold().green());
        println!("  Characters: {}", catalogue.characters().count());
        println!("  Weapons:    {}", catalogue.weapons().count());
        println!("  Effects:    {}", catalogue.effects().count());
        println!("  Tables:     {}", catalogue.tables().len());
        println!(
            "  Limits:     refinement 1..={}, talents 1..={}",
            catalogue.config.max_refinement, catalogue.config.max_talent_level
        );
        Ok(())
    }
}

fn print_report(report: &ValidationReport) {
    println!(
        "{}",
        style(format!("=== {} Validation Issue(s) ===", report.issues.len()))
            .bold()
            .red()
    );
    for issue in &report.issues {
        println!("  {} {}", style("✗").red(), issue);
    }
    println!();
}
