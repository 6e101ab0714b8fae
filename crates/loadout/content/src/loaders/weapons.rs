//! Weapon catalogue loader.

use std::path::Path;

use loadout_core::WeaponData;

use crate::formats::WeaponFile;
use crate::loaders::{LoadResult, parse_ron};

/// Loader for weapons from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load weapons from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a [`WeaponFile`]
    pub fn load(path: &Path) -> LoadResult<Vec<WeaponData>> {
        let file: WeaponFile = parse_ron(path, "weapon catalogue")?;
        tracing::debug!(count = file.weapons.len(), path = %path.display(), "loaded weapons");
        Ok(file.weapons)
    }
}
