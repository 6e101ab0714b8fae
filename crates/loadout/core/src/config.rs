/// Engine-wide limits that static data is validated against.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Highest weapon refinement rank. Refinement tables must cover `1..=max_refinement`.
    pub max_refinement: u8,

    /// Highest talent level. Talent tables must cover `1..=max_talent_level`.
    pub max_talent_level: u8,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of real equipment pieces in a build.
    pub const MAX_EQUIPMENT: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_REFINEMENT: u8 = 5;
    pub const DEFAULT_MAX_TALENT_LEVEL: u8 = 15;

    pub fn new() -> Self {
        Self {
            max_refinement: Self::DEFAULT_MAX_REFINEMENT,
            max_talent_level: Self::DEFAULT_MAX_TALENT_LEVEL,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
