//! Effect catalogue loader.

use std::path::Path;

use loadout_core::ActiveEffect;

use crate::formats::EffectFile;
use crate::loaders::{LoadResult, parse_ron};

/// Loader for toggleable effects (buffs, infusions) from RON files.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ActiveEffect>> {
        let file: EffectFile = parse_ron(path, "effect catalogue")?;
        tracing::debug!(count = file.effects.len(), path = %path.display(), "loaded effects");
        Ok(file.effects)
    }
}
