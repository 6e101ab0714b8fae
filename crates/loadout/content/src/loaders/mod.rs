//! Content loaders for reading engine data from files.
//!
//! This module provides loaders that convert RON/TOML files into engine types.
//! All catalogue loaders use the formats defined in [`crate::formats`].

pub mod build;
pub mod characters;
pub mod config;
pub mod effects;
pub mod factory;
pub mod tables;
pub mod weapons;

pub use build::BuildLoader;
pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;
pub use weapons::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parse a RON document, naming the file in the error.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content).map_err(|e| {
        anyhow::anyhow!("Failed to parse {} RON ({}): {}", what, path.display(), e)
    })
}
