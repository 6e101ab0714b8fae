//! StatContext - the immutable input of every formula evaluation.
//!
//! A context captures everything a formula or the type resolver may read:
//! merged stat values, the character's element, the build's ranks and the
//! override directives of the active effects. It is built fresh per
//! evaluation and never mutated afterwards, so any number of threads can
//! evaluate against the same context.

use sha2::{Digest, Sha256};
use strum::EnumCount;

use super::damage::DamageType;
use super::key::StatKey;
use crate::build::TalentLevels;
use crate::catalogue::{EffectId, OverrideDirective};
use crate::error::EngineError;
use crate::tables::RankKey;

/// Ranks that index data tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranks {
    pub refinement: u8,
    pub talents: TalentLevels,
}

impl Ranks {
    pub const fn new(refinement: u8, talents: TalentLevels) -> Self {
        Self {
            refinement,
            talents,
        }
    }

    pub const fn get(&self, key: RankKey) -> u8 {
        match key {
            RankKey::Refinement => self.refinement,
            RankKey::Talent(slot) => self.talents.get(slot),
        }
    }
}

/// Override directive of an active effect, with what the resolver needs to rank it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveOverride {
    pub effect: EffectId,
    pub priority: i32,
    pub directive: OverrideDirective,
}

/// Mapping of stat keys to values plus the evaluation inputs.
///
/// Contexts produced by [`super::StatContextBuilder`] carry every key of the
/// vocabulary. Hand-built contexts may be sparse; reading an absent key fails
/// with [`EngineError::MissingStat`].
#[derive(Clone, Debug, PartialEq)]
pub struct StatContext {
    values: [Option<f64>; StatKey::COUNT],
    element: DamageType,
    ranks: Ranks,
    /// Kept sorted by (priority desc, effect id asc).
    overrides: Vec<ActiveOverride>,
}

impl StatContext {
    /// Empty (sparse) context.
    pub fn new(element: DamageType, ranks: Ranks) -> Self {
        Self {
            values: [None; StatKey::COUNT],
            element,
            ranks,
            overrides: Vec::new(),
        }
    }

    /// Context carrying every key, all zero.
    pub fn zeroed(element: DamageType, ranks: Ranks) -> Self {
        Self {
            values: [Some(0.0); StatKey::COUNT],
            ..Self::new(element, ranks)
        }
    }

    /// Set a stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, key: StatKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Register an active override (builder pattern).
    #[must_use]
    pub fn with_override(mut self, over: ActiveOverride) -> Self {
        self.push_override(over);
        self
    }

    pub(crate) fn set(&mut self, key: StatKey, value: f64) {
        self.values[key.index()] = Some(value);
    }

    pub(crate) fn push_override(&mut self, over: ActiveOverride) {
        self.overrides.push(over);
        self.overrides.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.effect.cmp(&b.effect))
        });
    }

    /// Value of `key`, failing with `MissingStat` if the context does not carry it.
    pub fn get(&self, key: StatKey) -> Result<f64, EngineError> {
        self.values[key.index()].ok_or(EngineError::MissingStat(key))
    }

    /// Value of `key`, treating absent keys as zero.
    pub fn get_or_zero(&self, key: StatKey) -> f64 {
        self.values[key.index()].unwrap_or(0.0)
    }

    pub fn contains(&self, key: StatKey) -> bool {
        self.values[key.index()].is_some()
    }

    /// Element used by talents declared as elemental.
    pub fn element(&self) -> DamageType {
        self.element
    }

    pub fn ranks(&self) -> &Ranks {
        &self.ranks
    }

    pub fn rank(&self, key: RankKey) -> u8 {
        self.ranks.get(key)
    }

    /// Active overrides, highest priority first, ties by effect id.
    pub fn overrides(&self) -> &[ActiveOverride] {
        &self.overrides
    }

    /// Present stats in canonical key order.
    pub fn entries(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        StatKey::all().filter_map(|key| self.values[key.index()].map(|value| (key, value)))
    }

    /// SHA-256 over the canonical contents of the context.
    ///
    /// Two contexts with the same fingerprint evaluate every formula to the
    /// same bits, so callers can use it as a memoization key.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"loadout/stat-context/v1");

        for value in &self.values {
            match value {
                Some(v) => {
                    hasher.update([1u8]);
                    hasher.update(v.to_bits().to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
        }

        hasher.update(self.element.as_ref().as_bytes());
        hasher.update([
            self.ranks.refinement,
            self.ranks.talents.auto,
            self.ranks.talents.skill,
            self.ranks.talents.burst,
        ]);

        for over in &self.overrides {
            hasher.update(over.priority.to_le_bytes());
            hasher.update(over.effect.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(over.directive.targets.to_string().as_bytes());
            hasher.update(over.directive.into.as_ref().as_bytes());
        }

        hasher.finalize().into()
    }
}
