//! Command implementations for the `loadout` binary
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod fingerprint;
mod render;
mod resolve;
mod validate;

pub use fingerprint::Fingerprint;
pub use render::Render;
pub use resolve::Resolve;
pub use validate::Validate;

use std::path::Path;

use anyhow::{Context, Result};
use loadout_content::{BuildLoader, ContentFactory};
use loadout_core::{Build, Catalogue};

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

/// Load and validate the catalogue in `data_dir`.
pub fn load_catalogue(data_dir: &Path) -> Result<Catalogue> {
    ContentFactory::new(data_dir)
        .load_catalogue()
        .with_context(|| format!("Failed to load content from {}", data_dir.display()))
}

/// Load the builds in `path`, failing on an empty file.
pub fn load_builds(path: &Path) -> Result<Vec<Build>> {
    let builds = BuildLoader::load(path)?;
    if builds.is_empty() {
        anyhow::bail!("No builds found in {}", path.display());
    }
    Ok(builds)
}

/// One-line description of a build: `venti + the_viridescent_hunt R3 (real)`.
pub fn describe(build: &Build) -> String {
    format!(
        "{} + {} R{} ({})",
        build.character, build.weapon, build.refinement, build.kind
    )
}
