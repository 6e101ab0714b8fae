//! Static data the engine evaluates against.
//!
//! A [`Catalogue`] is assembled once (usually by `loadout-content`), validated,
//! and then shared read-only by every evaluation. Nothing in it changes per
//! build: refinement and talent levels live in the stat context.

mod ids;

pub use ids::{CharacterId, EffectId, TableId, WeaponId};

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::{EngineError, EntityKind};
use crate::stats::{Contribution, DamageType, StatKey, TalentBaseType};
use crate::tables::{DataTable, Tables};

/// Static character data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterData {
    pub id: CharacterId,
    pub name: String,
    /// Element used by talents declared as [`TalentBaseType::Elemental`].
    pub element: DamageType,
    pub base_stats: BTreeMap<StatKey, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub documents: Vec<Document>,
}

/// A weapon stat that scales with refinement through a table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinementStat {
    pub key: StatKey,
    pub table: TableId,
}

/// Static weapon data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub id: WeaponId,
    pub name: String,
    pub base_stats: BTreeMap<StatKey, f64>,
    /// Passive stats added at the build's refinement rank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub refinement_stats: Vec<RefinementStat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub documents: Vec<Document>,
}

/// Replaces a talent's declared damage type while the owning effect is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverrideDirective {
    /// Base type this directive applies to.
    pub targets: TalentBaseType,
    /// Effective type dealt instead.
    pub into: DamageType,
}

/// A conditional effect the user can toggle on a build (buff, infusion, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub id: EffectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Higher priority wins override conflicts and multiplies first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contributions: Vec<Contribution>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub directive: Option<OverrideDirective>,
}

impl ActiveEffect {
    pub fn new(id: impl Into<EffectId>, priority: i32) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            priority,
            contributions: Vec::new(),
            directive: None,
        }
    }

    /// Attach a stat contribution (builder pattern).
    #[must_use]
    pub fn with_contribution(mut self, contribution: Contribution) -> Self {
        self.contributions.push(contribution);
        self
    }

    /// Attach an override directive (builder pattern).
    #[must_use]
    pub fn with_directive(mut self, targets: TalentBaseType, into: DamageType) -> Self {
        self.directive = Some(OverrideDirective { targets, into });
        self
    }
}

/// All static data, immutable for the process lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalogue {
    pub config: EngineConfig,
    characters: BTreeMap<CharacterId, CharacterData>,
    weapons: BTreeMap<WeaponId, WeaponData>,
    effects: BTreeMap<EffectId, ActiveEffect>,
    tables: Tables,
}

impl Catalogue {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn insert_character(&mut self, character: CharacterData) {
        self.characters.insert(character.id.clone(), character);
    }

    pub fn insert_weapon(&mut self, weapon: WeaponData) {
        self.weapons.insert(weapon.id.clone(), weapon);
    }

    pub fn insert_effect(&mut self, effect: ActiveEffect) {
        self.effects.insert(effect.id.clone(), effect);
    }

    pub fn insert_table(&mut self, table: DataTable) {
        self.tables.insert(table);
    }

    /// Add a character (builder pattern).
    #[must_use]
    pub fn with_character(mut self, character: CharacterData) -> Self {
        self.insert_character(character);
        self
    }

    /// Add a weapon (builder pattern).
    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponData) -> Self {
        self.insert_weapon(weapon);
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: ActiveEffect) -> Self {
        self.insert_effect(effect);
        self
    }

    /// Add a table (builder pattern).
    #[must_use]
    pub fn with_table(mut self, table: DataTable) -> Self {
        self.insert_table(table);
        self
    }

    pub fn character(&self, id: &CharacterId) -> Result<&CharacterData, EngineError> {
        self.characters
            .get(id)
            .ok_or_else(|| EngineError::UnknownEntity {
                kind: EntityKind::Character,
                id: id.to_string(),
            })
    }

    pub fn weapon(&self, id: &WeaponId) -> Result<&WeaponData, EngineError> {
        self.weapons.get(id).ok_or_else(|| EngineError::UnknownEntity {
            kind: EntityKind::Weapon,
            id: id.to_string(),
        })
    }

    pub fn effect(&self, id: &EffectId) -> Result<&ActiveEffect, EngineError> {
        self.effects.get(id).ok_or_else(|| EngineError::UnknownEntity {
            kind: EntityKind::Effect,
            id: id.to_string(),
        })
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterData> {
        self.characters.values()
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponData> {
        self.weapons.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.values()
    }
}
