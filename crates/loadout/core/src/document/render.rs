//! Rendering documents against a stat context.

use super::format::{format_authored, format_stat, format_value};
use super::{Document, Field, Segment};
use crate::error::EngineError;
use crate::formula::evaluate;
use crate::resolver;
use crate::stats::{DamageType, StatContext};
use crate::tables::Tables;

/// A field rendered successfully.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedField {
    pub label: String,
    pub value: f64,
    pub text: String,
    /// Resolved damage type; `None` when the field declares no base type.
    pub effective_type: Option<DamageType>,
}

/// A field that failed to render. Other fields of the document are unaffected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldFailure {
    pub label: String,
    pub error: EngineError,
}

pub type FieldOutcome = Result<RenderedField, FieldFailure>;

/// Render every field of `doc`, in order.
///
/// A failing field yields a [`FieldFailure`] in its slot and does not stop
/// the remaining fields from rendering.
pub fn render(doc: &Document, ctx: &StatContext, tables: &Tables) -> Vec<FieldOutcome> {
    doc.fields
        .iter()
        .map(|field| {
            render_field(field, ctx, tables).map_err(|error| {
                tracing::warn!(
                    document = %doc.title,
                    field = %field.label,
                    code = error.error_code(),
                    %error,
                    "field failed to render"
                );
                FieldFailure {
                    label: field.label.clone(),
                    error,
                }
            })
        })
        .collect()
}

/// Render a single field.
pub fn render_field(
    field: &Field,
    ctx: &StatContext,
    tables: &Tables,
) -> Result<RenderedField, EngineError> {
    let effective_type = field.base_type.map(|base| resolver::resolve(base, ctx));
    let value = evaluate(&field.value, ctx, tables)?;

    let mut text = String::new();
    for segment in &field.template.segments {
        match segment {
            Segment::Text(literal) => text.push_str(literal),
            Segment::TableValue { table, rank } => {
                text.push_str(&format_authored(tables.get(table)?, ctx.rank(*rank))?);
            }
            Segment::Value(format) => text.push_str(&format_value(value, *format)),
            Segment::StatValue(key) => text.push_str(&format_stat(*key, ctx.get(*key)?)),
            Segment::DmgTag => text.push_str(&typed(field, effective_type)?.dmg_tag()),
            Segment::TypeName => text.push_str(typed(field, effective_type)?.name()),
        }
    }

    Ok(RenderedField {
        label: field.label.clone(),
        value,
        text,
        effective_type,
    })
}

fn typed(field: &Field, effective: Option<DamageType>) -> Result<DamageType, EngineError> {
    effective.ok_or_else(|| EngineError::UntypedField {
        label: field.label.clone(),
    })
}
