//! Declarative talent and weapon descriptions.
//!
//! A [`Document`] is an ordered list of [`Field`]s. Each field binds a label,
//! a formula for its numeric value, a display template, and optionally the
//! base damage type of the talent it describes. Fields hold no closures: every
//! input comes from the stat context passed to [`render`].

mod format;
mod render;

pub use format::{format_authored, format_stat, format_value};
pub use render::{FieldFailure, FieldOutcome, RenderedField, render, render_field};

use crate::catalogue::TableId;
use crate::formula::Node;
use crate::stats::{StatKey, TalentBaseType};
use crate::tables::RankKey;

/// How a numeric value is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// Rounded to an integer (`483`).
    Flat,
    /// Fraction shown as a percentage with one decimal (`48.3%`).
    Percent,
    /// Fixed number of decimals.
    Decimal(u8),
}

/// One piece of a display template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// Table value at the context's rank, as authored (`48.3%`).
    TableValue { table: TableId, rank: RankKey },
    /// The field's own numeric value.
    Value(ValueFormat),
    /// A stat from the context, formatted by its unit.
    StatValue(StatKey),
    /// Damage tag of the resolved type (`Pyro DMG`).
    DmgTag,
    /// Name of the resolved type (`Pyro`).
    TypeName,
}

impl Segment {
    /// Whether rendering this segment needs the field's effective type.
    pub fn needs_type(&self) -> bool {
        matches!(self, Self::DmgTag | Self::TypeName)
    }
}

/// Ordered segments rendered into a field's display text.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DisplayTemplate {
    pub segments: Vec<Segment>,
}

impl DisplayTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text (builder pattern).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    /// Append an authored table value (builder pattern).
    #[must_use]
    pub fn table_value(mut self, table: impl Into<TableId>, rank: RankKey) -> Self {
        self.segments.push(Segment::TableValue {
            table: table.into(),
            rank,
        });
        self
    }

    /// Append the field value (builder pattern).
    #[must_use]
    pub fn value(mut self, format: ValueFormat) -> Self {
        self.segments.push(Segment::Value(format));
        self
    }

    /// Append a formatted stat (builder pattern).
    #[must_use]
    pub fn stat(mut self, key: StatKey) -> Self {
        self.segments.push(Segment::StatValue(key));
        self
    }

    /// Append the resolved damage tag (builder pattern).
    #[must_use]
    pub fn dmg_tag(mut self) -> Self {
        self.segments.push(Segment::DmgTag);
        self
    }

    /// Append the resolved type name (builder pattern).
    #[must_use]
    pub fn type_name(mut self) -> Self {
        self.segments.push(Segment::TypeName);
        self
    }

    pub fn needs_type(&self) -> bool {
        self.segments.iter().any(Segment::needs_type)
    }

    /// Every `(table, rank)` pair the template prints.
    pub fn table_refs(&self) -> impl Iterator<Item = (&TableId, RankKey)> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::TableValue { table, rank } => Some((table, *rank)),
            _ => None,
        })
    }
}

/// One line of a document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub label: String,
    pub value: Node,
    pub template: DisplayTemplate,
    /// Declared damage type of the talent; `None` for non-damage lines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_type: Option<TalentBaseType>,
}

impl Field {
    pub fn new(label: impl Into<String>, value: Node, template: DisplayTemplate) -> Self {
        Self {
            label: label.into(),
            value,
            template,
            base_type: None,
        }
    }

    /// Declare the talent's base damage type (builder pattern).
    #[must_use]
    pub fn typed(mut self, base_type: TalentBaseType) -> Self {
        self.base_type = Some(base_type);
        self
    }
}

/// Ordered fields describing one talent or weapon.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub title: String,
    pub fields: Vec<Field>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}
