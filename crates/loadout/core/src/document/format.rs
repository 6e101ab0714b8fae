//! Number formatting at the display boundary.
//!
//! Values inside the engine are fractions; this is the only place they are
//! multiplied by 100.

use super::ValueFormat;
use crate::error::EngineError;
use crate::stats::StatKey;
use crate::tables::{DataTable, TableUnit};

pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Flat => format!("{:.0}", value),
        ValueFormat::Percent => format!("{:.1}%", value * 100.0),
        ValueFormat::Decimal(places) => format!("{:.*}", usize::from(places), value),
    }
}

pub fn format_stat(key: StatKey, value: f64) -> String {
    if key.is_percent() {
        format_value(value, ValueFormat::Percent)
    } else {
        format_value(value, ValueFormat::Flat)
    }
}

/// Authored table value at `rank` with its unit (`48.3%`, `40%`, `12`).
pub fn format_authored(table: &DataTable, rank: u8) -> Result<String, EngineError> {
    let authored = table.authored(rank)?;
    Ok(match table.unit {
        TableUnit::Percent => format!("{authored}%"),
        TableUnit::Flat => format!("{authored}"),
    })
}
