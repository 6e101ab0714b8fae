//! Static data for the loadout engine and its loaders.
//!
//! This crate provides the on-disk formats and loaders for RON/TOML data files:
//! - Characters with their talent documents (RON)
//! - Weapons with refinement-scaled passives (RON)
//! - Toggleable effects: buffs and infusions (RON)
//! - Rank-indexed coefficient tables (RON)
//! - Engine configuration (TOML)
//! - Builds handed over by the shell (JSON or RON)
//!
//! All formats wrap `loadout-core` types directly; loaded content is assembled
//! into one validated [`loadout_core::Catalogue`] by [`ContentFactory`].

pub mod formats;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use formats::{CharacterFile, EffectFile, TableFile, WeaponFile};

#[cfg(feature = "loaders")]
pub use loaders::{
    BuildLoader, CharacterLoader, ConfigLoader, ContentFactory, EffectLoader, LoadResult,
    TablesLoader, WeaponLoader,
};
