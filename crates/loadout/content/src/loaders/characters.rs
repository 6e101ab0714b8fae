//! Character catalogue loader.

use std::path::Path;

use loadout_core::CharacterData;

use crate::formats::CharacterFile;
use crate::loaders::{LoadResult, parse_ron};

/// Loader for characters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load characters (with their talent documents) from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterData>> {
        let file: CharacterFile = parse_ron(path, "character catalogue")?;
        tracing::debug!(count = file.characters.len(), path = %path.display(), "loaded characters");
        Ok(file.characters)
    }
}
