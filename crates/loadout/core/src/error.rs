//! Error taxonomy for stat resolution and formula evaluation.
//!
//! Almost every failure the engine can report is a defect in authored static
//! data (a formula reading a stat the context never carries, a table indexed
//! past its last rank). Those are expected to be caught by
//! [`crate::validation::validate`] when content is loaded; if one escapes to
//! evaluation time it only fails the single field being rendered.
//!
//! The remaining variants describe bad input from the build layer (an id that
//! is not in the catalogue, a refinement outside the supported range).

use crate::catalogue::TableId;
use crate::stats::StatKey;
use crate::tables::RankKey;

/// Severity of an [`EngineError`], used to decide who has to fix it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Static data was authored incorrectly. Never retryable.
    ///
    /// Examples: unknown stat key, table shorter than the rank range.
    DataDefect,

    /// The build handed to the engine references something that does not exist.
    ///
    /// Examples: unknown weapon id, refinement 6.
    Input,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DataDefect => "data-defect",
            Self::Input => "input",
        }
    }
}

/// Kind of catalogue entry an id failed to resolve against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Character,
    Weapon,
    Effect,
}

/// Errors raised while building a stat context or evaluating formulas.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// A stat key string is not part of the closed vocabulary.
    #[error("unknown stat key `{0}`")]
    UnknownStatKey(String),

    /// A formula read a stat the context does not carry.
    #[error("stat `{0}` is missing from the stat context")]
    MissingStat(StatKey),

    /// A table was indexed outside `1..=max`.
    #[error("rank {rank} is out of range for table `{table}` (valid ranks 1..={max})")]
    RankOutOfRange { table: TableId, rank: u8, max: usize },

    /// A formula or template referenced a table that is not loaded.
    #[error("unknown table `{0}`")]
    UnknownTable(TableId),

    /// A template asked for a damage type on a field that declares none.
    #[error("field `{label}` renders a damage type but declares no base type")]
    UntypedField { label: String },

    /// The build references a catalogue entry that does not exist.
    #[error("unknown {kind} `{id}`")]
    UnknownEntity { kind: EntityKind, id: String },

    /// A build rank (refinement or talent level) is outside the configured range.
    #[error("{key} rank {rank} is outside 1..={max}")]
    InvalidRank { key: RankKey, rank: u8, max: u8 },

    /// Build equipment names a derived total, which only the engine computes.
    #[error("`{origin}` contributes to derived stat `{key}`")]
    DerivedStat { key: StatKey, origin: String },
}

impl EngineError {
    /// Returns the severity level of this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownStatKey(_)
            | Self::MissingStat(_)
            | Self::RankOutOfRange { .. }
            | Self::UnknownTable(_)
            | Self::UntypedField { .. } => ErrorSeverity::DataDefect,
            Self::UnknownEntity { .. } | Self::InvalidRank { .. } | Self::DerivedStat { .. } => {
                ErrorSeverity::Input
            }
        }
    }

    /// Returns a stable identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStatKey(_) => "UNKNOWN_STAT_KEY",
            Self::MissingStat(_) => "MISSING_STAT",
            Self::RankOutOfRange { .. } => "RANK_OUT_OF_RANGE",
            Self::UnknownTable(_) => "UNKNOWN_TABLE",
            Self::UntypedField { .. } => "UNTYPED_FIELD",
            Self::UnknownEntity { .. } => "UNKNOWN_ENTITY",
            Self::InvalidRank { .. } => "INVALID_RANK",
            Self::DerivedStat { .. } => "DERIVED_STAT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authoring_defects_are_classified_as_data_defects() {
        let err = EngineError::RankOutOfRange {
            table: TableId::new("hunt_dmg"),
            rank: 6,
            max: 5,
        };
        assert_eq!(err.severity(), ErrorSeverity::DataDefect);
        assert_eq!(err.error_code(), "RANK_OUT_OF_RANGE");
        assert_eq!(
            err.to_string(),
            "rank 6 is out of range for table `hunt_dmg` (valid ranks 1..=5)"
        );
    }

    #[test]
    fn unknown_ids_are_input_errors() {
        let err = EngineError::UnknownEntity {
            kind: EntityKind::Weapon,
            id: "missing_bow".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Input);
        assert_eq!(err.to_string(), "unknown weapon `missing_bow`");
    }
}
