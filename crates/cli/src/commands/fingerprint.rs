//! Print the stat context fingerprint of each build.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use console::style;
use loadout_core::StatContextBuilder;

use super::{describe, load_builds, load_catalogue};

/// Print the stat context fingerprint of each build
#[derive(Parser)]
pub struct Fingerprint {
    /// Build file (JSON or RON, one build or a list)
    #[arg(value_name = "BUILD")]
    build: PathBuf,
}

impl Fingerprint {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let catalogue = load_catalogue(data_dir)?;
        let builds = load_builds(&self.build)?;
        let builder = StatContextBuilder::new(&catalogue);

        for (index, build) in builds.iter().enumerate() {
            match builder.build(build) {
                Ok(ctx) => println!(
                    "{} {}  {}",
                    style(format!("#{index}")).bold().cyan(),
                    hex::encode(ctx.fingerprint()),
                    describe(build)
                ),
                Err(err) => println!(
                    "{} {}  {} ({})",
                    style(format!("#{index}")).bold().cyan(),
                    style(err.error_code()).red(),
                    describe(build),
                    err
                ),
            }
        }
        Ok(())
    }
}
