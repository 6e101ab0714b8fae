//! Rank-indexed coefficient tables.
//!
//! Tables are authored in display units (`48.3` for 48.3%) and indexed
//! 1-based by weapon refinement or talent level. Lookups used inside formulas
//! return fractions for percentage tables; the authored value is only used at
//! the formatting boundary.

use std::collections::BTreeMap;

use crate::catalogue::TableId;
use crate::error::EngineError;

/// Unit the table values are authored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableUnit {
    /// Percentages; formula lookups divide by 100.
    #[default]
    Percent,
    /// Plain numbers used as-is.
    Flat,
}

/// Talent slot a talent-level rank refers to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TalentSlot {
    Auto,
    Skill,
    Burst,
}

/// Which rank of the build indexes a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankKey {
    /// Weapon refinement (1..=5).
    Refinement,
    /// Level of one of the character's talents.
    Talent(TalentSlot),
}

impl core::fmt::Display for RankKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Refinement => f.write_str("refinement"),
            Self::Talent(slot) => write!(f, "{slot} talent"),
        }
    }
}

/// One rank-indexed array of coefficients.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataTable {
    pub id: TableId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: TableUnit,
    pub values: Vec<f64>,
}

impl DataTable {
    pub fn new(id: impl Into<TableId>, unit: TableUnit, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            unit,
            values,
        }
    }

    /// Percentage table authored in display units.
    pub fn percent(id: impl Into<TableId>, values: impl Into<Vec<f64>>) -> Self {
        Self::new(id, TableUnit::Percent, values.into())
    }

    /// Flat table.
    pub fn flat(id: impl Into<TableId>, values: impl Into<Vec<f64>>) -> Self {
        Self::new(id, TableUnit::Flat, values.into())
    }

    /// Highest valid rank.
    pub fn max_rank(&self) -> usize {
        self.values.len()
    }

    /// Value exactly as authored (display units).
    pub fn authored(&self, rank: u8) -> Result<f64, EngineError> {
        let index = usize::from(rank);
        if index == 0 || index > self.values.len() {
            return Err(EngineError::RankOutOfRange {
                table: self.id.clone(),
                rank,
                max: self.values.len(),
            });
        }
        Ok(self.values[index - 1])
    }

    /// Value in formula units (fraction for percentage tables).
    pub fn value(&self, rank: u8) -> Result<f64, EngineError> {
        let authored = self.authored(rank)?;
        Ok(match self.unit {
            TableUnit::Percent => authored / 100.0,
            TableUnit::Flat => authored,
        })
    }
}

/// Every loaded table, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tables {
    tables: BTreeMap<TableId, DataTable>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, replacing any table with the same id.
    pub fn insert(&mut self, table: DataTable) -> Option<DataTable> {
        self.tables.insert(table.id.clone(), table)
    }

    pub fn get(&self, id: &TableId) -> Result<&DataTable, EngineError> {
        self.tables
            .get(id)
            .ok_or_else(|| EngineError::UnknownTable(id.clone()))
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.tables.contains_key(id)
    }

    /// Formula-unit lookup, see [`DataTable::value`].
    pub fn lookup(&self, id: &TableId, rank: u8) -> Result<f64, EngineError> {
        self.get(id)?.value(rank)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<DataTable> for Tables {
    fn from_iter<I: IntoIterator<Item = DataTable>>(iter: I) -> Self {
        let mut tables = Self::new();
        for table in iter {
            tables.insert(table);
        }
        tables
    }
}
