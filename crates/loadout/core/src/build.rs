//! Build input handed over by the build/persistence layer.
//!
//! The engine does not check build legality (duplicate slots, main stat rules);
//! it only reads what the build says is equipped.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::catalogue::{CharacterId, EffectId, WeaponId};
use crate::config::EngineConfig;
use crate::stats::StatKey;
use crate::tables::TalentSlot;

/// Where a build came from. Informational only; evaluation is identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BuildKind {
    /// Whatever the character currently has equipped.
    #[default]
    Equipped,
    /// A saved build of real, owned equipment.
    Real,
    /// A theorycrafted build whose equipment is described by stat totals.
    Theorycraft,
}

/// Equipment slot of a single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

/// One equipped piece and its `(StatKey, value)` pairs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentPiece {
    pub slot: EquipmentSlot,
    pub stats: BTreeMap<StatKey, f64>,
}

impl EquipmentPiece {
    pub fn new(slot: EquipmentSlot) -> Self {
        Self {
            slot,
            stats: BTreeMap::new(),
        }
    }

    /// Add a stat (builder pattern). Repeated keys accumulate.
    #[must_use]
    pub fn with_stat(mut self, key: StatKey, value: f64) -> Self {
        *self.stats.entry(key).or_insert(0.0) += value;
        self
    }
}

/// Equipment side of a build.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Equipment {
    /// Up to five real pieces.
    Pieces(ArrayVec<EquipmentPiece, { EngineConfig::MAX_EQUIPMENT }>),
    /// Theorycrafted stat totals standing in for the whole set.
    Theorycraft(BTreeMap<StatKey, f64>),
}

impl Default for Equipment {
    fn default() -> Self {
        Self::Pieces(ArrayVec::new())
    }
}

impl Equipment {
    /// Every `(key, value, source)` the equipment contributes.
    ///
    /// Source names are stable per slot so two orderings of the same pieces
    /// tag their contributions identically.
    pub fn stat_sources(&self) -> Vec<(StatKey, f64, String)> {
        match self {
            Self::Pieces(pieces) => pieces
                .iter()
                .flat_map(|piece| {
                    piece
                        .stats
                        .iter()
                        .map(move |(key, value)| (*key, *value, format!("equipment:{}", piece.slot)))
                })
                .collect(),
            Self::Theorycraft(stats) => stats
                .iter()
                .map(|(key, value)| (*key, *value, "equipment:theorycraft".to_string()))
                .collect(),
        }
    }
}

/// Levels of the three character talents (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TalentLevels {
    pub auto: u8,
    pub skill: u8,
    pub burst: u8,
}

impl TalentLevels {
    pub const fn new(auto: u8, skill: u8, burst: u8) -> Self {
        Self { auto, skill, burst }
    }

    pub const fn get(&self, slot: TalentSlot) -> u8 {
        match slot {
            TalentSlot::Auto => self.auto,
            TalentSlot::Skill => self.skill,
            TalentSlot::Burst => self.burst,
        }
    }
}

impl Default for TalentLevels {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Everything the engine needs to know about one build.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Build {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: BuildKind,
    pub character: CharacterId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub talents: TalentLevels,
    pub weapon: WeaponId,
    pub refinement: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    /// Toggled effects. Treated as a set: order and duplicates are irrelevant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_effects: Vec<EffectId>,
}

impl Build {
    pub fn new(
        character: impl Into<CharacterId>,
        weapon: impl Into<WeaponId>,
        refinement: u8,
    ) -> Self {
        Self {
            kind: BuildKind::default(),
            character: character.into(),
            talents: TalentLevels::default(),
            weapon: weapon.into(),
            refinement,
            equipment: Equipment::default(),
            active_effects: Vec::new(),
        }
    }

    /// Set the build kind (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: BuildKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set talent levels (builder pattern).
    #[must_use]
    pub fn with_talents(mut self, talents: TalentLevels) -> Self {
        self.talents = talents;
        self
    }

    /// Set equipment (builder pattern).
    #[must_use]
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Toggle an effect on (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.active_effects.push(effect.into());
        self
    }

    /// Active effect ids, sorted and deduplicated.
    pub fn effect_set(&self) -> Vec<EffectId> {
        let mut ids = self.active_effects.clone();
        ids.sort();
        ids.dedup();
        ids
    }
}
