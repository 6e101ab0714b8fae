//! Engine configuration loader.

use std::path::Path;

use loadout_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EngineConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_refinement == 0 || config.max_talent_level == 0 {
            anyhow::bail!(
                "Invalid config: max_refinement ({}) and max_talent_level ({}) must be at least 1",
                config.max_refinement,
                config.max_talent_level
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("max_talent_level = 13\n").unwrap();
        assert_eq!(config.max_talent_level, 13);
        assert_eq!(config.max_refinement, EngineConfig::default().max_refinement);
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(ConfigLoader::parse("max_refinement = 0\n").is_err());
    }
}
