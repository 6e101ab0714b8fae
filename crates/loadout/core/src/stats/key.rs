//! The closed stat vocabulary.

use strum::{EnumCount, IntoEnumIterator};

use crate::error::EngineError;

/// Identifier of one numeric attribute.
///
/// The vocabulary is closed: anything outside it is rejected with
/// [`EngineError::UnknownStatKey`] when static data is parsed, never during
/// evaluation. The string form is snake_case (`atk_percent`) and parsing is
/// ASCII case-insensitive.
///
/// Declaration order is the canonical key order used for fingerprints and
/// diagnostics.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKey {
    BaseHp,
    BaseAtk,
    BaseDef,
    Hp,
    HpPercent,
    Atk,
    AtkPercent,
    Def,
    DefPercent,
    ElementalMastery,
    EnergyRecharge,
    CritRate,
    CritDmg,
    HealBonus,
    PhysicalDmgBonus,
    PyroDmgBonus,
    HydroDmgBonus,
    ElectroDmgBonus,
    CryoDmgBonus,
    AnemoDmgBonus,
    GeoDmgBonus,
    DendroDmgBonus,
    TotalHp,
    TotalAtk,
    TotalDef,
}

impl StatKey {
    /// Parses a snake_case key, failing with `UnknownStatKey` outside the vocabulary.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        raw.parse()
            .map_err(|_| EngineError::UnknownStatKey(raw.to_string()))
    }

    /// Position of this key in the canonical order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All keys in canonical order.
    pub fn all() -> impl Iterator<Item = StatKey> {
        Self::iter()
    }

    /// Number of keys in the vocabulary.
    pub const fn count() -> usize {
        Self::COUNT
    }

    /// Whether the value is a fraction displayed as a percentage.
    pub const fn is_percent(self) -> bool {
        matches!(
            self,
            Self::HpPercent
                | Self::AtkPercent
                | Self::DefPercent
                | Self::EnergyRecharge
                | Self::CritRate
                | Self::CritDmg
                | Self::HealBonus
                | Self::PhysicalDmgBonus
                | Self::PyroDmgBonus
                | Self::HydroDmgBonus
                | Self::ElectroDmgBonus
                | Self::CryoDmgBonus
                | Self::AnemoDmgBonus
                | Self::GeoDmgBonus
                | Self::DendroDmgBonus
        )
    }

    /// Whether the value is computed from other keys after merging.
    ///
    /// Derived keys are never contribution targets.
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::TotalHp | Self::TotalAtk | Self::TotalDef)
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BaseHp => "Base HP",
            Self::BaseAtk => "Base ATK",
            Self::BaseDef => "Base DEF",
            Self::Hp => "HP",
            Self::HpPercent => "HP%",
            Self::Atk => "ATK",
            Self::AtkPercent => "ATK%",
            Self::Def => "DEF",
            Self::DefPercent => "DEF%",
            Self::ElementalMastery => "Elemental Mastery",
            Self::EnergyRecharge => "Energy Recharge",
            Self::CritRate => "CRIT Rate",
            Self::CritDmg => "CRIT DMG",
            Self::HealBonus => "Healing Bonus",
            Self::PhysicalDmgBonus => "Physical DMG Bonus",
            Self::PyroDmgBonus => "Pyro DMG Bonus",
            Self::HydroDmgBonus => "Hydro DMG Bonus",
            Self::ElectroDmgBonus => "Electro DMG Bonus",
            Self::CryoDmgBonus => "Cryo DMG Bonus",
            Self::AnemoDmgBonus => "Anemo DMG Bonus",
            Self::GeoDmgBonus => "Geo DMG Bonus",
            Self::DendroDmgBonus => "Dendro DMG Bonus",
            Self::TotalHp => "Total HP",
            Self::TotalAtk => "Total ATK",
            Self::TotalDef => "Total DEF",
        }
    }
}

impl TryFrom<String> for StatKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StatKey> for String {
    fn from(key: StatKey) -> Self {
        key.as_ref().to_string()
    }
}
