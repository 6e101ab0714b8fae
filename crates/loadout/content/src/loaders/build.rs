//! Build file loader.
//!
//! Builds come from the shell as JSON; hand-written builds may use RON.

use std::path::Path;

use loadout_core::Build;

use crate::loaders::{LoadResult, read_file};

/// Loader for a single build or a list of builds.
pub struct BuildLoader;

impl BuildLoader {
    /// Load builds from a `.json` or `.ron` file.
    ///
    /// The file may hold a single build or a list of builds.
    pub fn load(path: &Path) -> LoadResult<Vec<Build>> {
        let content = read_file(path)?;
        let is_ron = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));

        let builds = if is_ron {
            Self::parse_ron(&content)
        } else {
            Self::parse_json(&content)
        }
        .map_err(|e| e.context(format!("Failed to load builds from {}", path.display())))?;

        tracing::debug!(count = builds.len(), path = %path.display(), "loaded builds");
        Ok(builds)
    }

    pub fn parse_json(content: &str) -> LoadResult<Vec<Build>> {
        let builds = if is_list(content) {
            serde_json::from_str(content)
        } else {
            serde_json::from_str::<Build>(content).map(|build| vec![build])
        };
        builds.map_err(|e| anyhow::anyhow!("Failed to parse build JSON: {}", e))
    }

    pub fn parse_ron(content: &str) -> LoadResult<Vec<Build>> {
        let builds = if is_list(content) {
            ron::from_str(content)
        } else {
            ron::from_str::<Build>(content).map(|build| vec![build])
        };
        builds.map_err(|e| anyhow::anyhow!("Failed to parse build RON: {}", e))
    }
}

fn is_list(content: &str) -> bool {
    content.trim_start().starts_with('[')
}
