//! File layouts of the data directory.
//!
//! Each catalogue file is a single RON struct with one list field, e.g.
//!
//! ```text
//! (
//!     weapons: [
//!         (id: "the_viridescent_hunt", name: "The Viridescent Hunt", base_stats: {"base_atk": 510.0}),
//!     ],
//! )
//! ```

use loadout_core::{ActiveEffect, CharacterData, DataTable, WeaponData};
use serde::{Deserialize, Serialize};

/// `characters.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterFile {
    pub characters: Vec<CharacterData>,
}

/// `weapons.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponFile {
    pub weapons: Vec<WeaponData>,
}

/// `effects.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectFile {
    pub effects: Vec<ActiveEffect>,
}

/// `tables.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFile {
    pub tables: Vec<DataTable>,
}
