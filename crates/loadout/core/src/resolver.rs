//! Talent type resolution.
//!
//! This is the only place that decides which damage type a talent deals.
//! Document rendering, damage tags and [`crate::Node::DmgBonus`] all go
//! through [`resolve`], so a displayed type can never disagree with the type
//! a formula used.
//!
//! ```text
//! base type ──► eligible overrides (targets == base)
//!                    │
//!          ┌─────────┴─────────┐
//!        none             highest priority
//!          │              (ties: smallest effect id)
//!          ▼                   ▼
//!   default type          directive.into
//! ```

use crate::catalogue::EffectId;
use crate::stats::{DamageType, StatContext, TalentBaseType};

/// Outcome of a resolution, with the effect that decided it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub effective: DamageType,
    /// Winning effect, `None` when the base type's default applied.
    pub source: Option<EffectId>,
}

/// Effective damage type of a talent declared as `base` under `ctx`.
pub fn resolve(base: TalentBaseType, ctx: &StatContext) -> DamageType {
    resolve_with_source(base, ctx).effective
}

/// Like [`resolve`], also reporting which effect won.
pub fn resolve_with_source(base: TalentBaseType, ctx: &StatContext) -> Resolution {
    // Overrides are stored highest priority first, ties by ascending effect id,
    // so the first eligible entry is the winner regardless of activation order.
    let winner = ctx
        .overrides()
        .iter()
        .find(|over| over.directive.targets == base);

    match winner {
        Some(over) => {
            tracing::trace!(
                %base,
                effect = %over.effect,
                priority = over.priority,
                into = %over.directive.into,
                "override applied"
            );
            Resolution {
                effective: over.directive.into,
                source: Some(over.effect.clone()),
            }
        }
        None => Resolution {
            effective: base.default_effective(ctx.element()),
            source: None,
        },
    }
}
