//! Damage types and the base types talents are declared with.

use super::key::StatKey;

/// Damage type actually dealt by a talent (the effective type).
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Physical,
    Pyro,
    Hydro,
    Electro,
    Cryo,
    Anemo,
    Geo,
    Dendro,
}

impl DamageType {
    /// The DMG bonus stat that scales damage of this type.
    pub const fn dmg_bonus_key(self) -> StatKey {
        match self {
            Self::Physical => StatKey::PhysicalDmgBonus,
            Self::Pyro => StatKey::PyroDmgBonus,
            Self::Hydro => StatKey::HydroDmgBonus,
            Self::Electro => StatKey::ElectroDmgBonus,
            Self::Cryo => StatKey::CryoDmgBonus,
            Self::Anemo => StatKey::AnemoDmgBonus,
            Self::Geo => StatKey::GeoDmgBonus,
            Self::Dendro => StatKey::DendroDmgBonus,
        }
    }

    /// Capitalised name, e.g. `Pyro`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Pyro => "Pyro",
            Self::Hydro => "Hydro",
            Self::Electro => "Electro",
            Self::Cryo => "Cryo",
            Self::Anemo => "Anemo",
            Self::Geo => "Geo",
            Self::Dendro => "Dendro",
        }
    }

    /// Damage tag shown next to talent values, e.g. `Pyro DMG`.
    pub fn dmg_tag(self) -> String {
        format!("{} DMG", self.name())
    }
}

/// Damage type a talent is declared with in static data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TalentBaseType {
    /// Plain physical damage (normal and charged attacks).
    Physical,
    /// The wielder's own element.
    Elemental,
    /// Always the given type unless overridden.
    Fixed(DamageType),
}

impl TalentBaseType {
    /// Effective type when no override applies.
    pub const fn default_effective(self, element: DamageType) -> DamageType {
        match self {
            Self::Physical => DamageType::Physical,
            Self::Elemental => element,
            Self::Fixed(damage) => damage,
        }
    }
}

impl core::fmt::Display for TalentBaseType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Physical => f.write_str("physical"),
            Self::Elemental => f.write_str("elemental"),
            Self::Fixed(damage) => write!(f, "fixed({damage})"),
        }
    }
}
