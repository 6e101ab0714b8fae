//! String identifiers for catalogue entries.
//!
//! Ids are ordered lexicographically; that order is the tie-break between
//! effects of equal priority.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Character identifier (`venti`).
    CharacterId
);
string_id!(
    /// Weapon identifier (`the_viridescent_hunt`).
    WeaponId
);
string_id!(
    /// Active effect identifier (`pyro_infusion`).
    EffectId
);
string_id!(
    /// Data table identifier (`viridescent_hunt_dmg`).
    TableId
);
