//! Builds a [`StatContext`] from a build and the catalogue.
//!
//! Stat sources, in the order they are collected:
//!
//! 1. **Character**: base stats of the character
//! 2. **Weapon**: base stats and refinement-scaled passive stats
//! 3. **Equipment**: real pieces or theorycrafted totals
//! 4. **Effects**: contributions of every toggled effect
//!
//! Collection order does not matter: each key's contributions are folded by a
//! [`ContributionStack`], which sorts them into a canonical order first.

use strum::EnumCount;

use super::bonus::{ContributionStack, MergeOp};
use super::context::{ActiveOverride, Ranks, StatContext};
use super::key::StatKey;
use crate::build::Build;
use crate::catalogue::Catalogue;
use crate::error::EngineError;
use crate::tables::{RankKey, TalentSlot};

/// Priority of contributions that come from the build itself rather than an effect.
const BASE_PRIORITY: i32 = 0;

/// Assembles stat contexts against one catalogue.
#[derive(Clone, Copy, Debug)]
pub struct StatContextBuilder<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> StatContextBuilder<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// Build the context for `build`.
    ///
    /// # Errors
    /// - `UnknownEntity` for an unknown character, weapon or effect id
    /// - `InvalidRank` for a refinement or talent level outside the configured range
    /// - `DerivedStat` if equipment contributes to a derived total
    /// - `RankOutOfRange` / `UnknownTable` if a refinement-scaled weapon stat is misauthored
    pub fn build(&self, build: &Build) -> Result<StatContext, EngineError> {
        let config = &self.catalogue.config;
        check_rank(RankKey::Refinement, build.refinement, config.max_refinement)?;
        for slot in [TalentSlot::Auto, TalentSlot::Skill, TalentSlot::Burst] {
            check_rank(
                RankKey::Talent(slot),
                build.talents.get(slot),
                config.max_talent_level,
            )?;
        }

        let character = self.catalogue.character(&build.character)?;
        let weapon = self.catalogue.weapon(&build.weapon)?;
        let effects = build
            .effect_set()
            .iter()
            .map(|id| self.catalogue.effect(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut stacks: [ContributionStack; StatKey::COUNT] =
            std::array::from_fn(|_| ContributionStack::new());

        let character_source = format!("character:{}", character.id);
        for (key, value) in &character.base_stats {
            stacks[key.index()].push(character_source.as_str(), BASE_PRIORITY, MergeOp::Add, *value);
        }

        let weapon_source = format!("weapon:{}", weapon.id);
        for (key, value) in &weapon.base_stats {
            stacks[key.index()].push(weapon_source.as_str(), BASE_PRIORITY, MergeOp::Add, *value);
        }
        for passive in &weapon.refinement_stats {
            let value = self
                .catalogue
                .tables()
                .lookup(&passive.table, build.refinement)?;
            stacks[passive.key.index()].push(
                weapon_source.as_str(),
                BASE_PRIORITY,
                MergeOp::Add,
                value,
            );
        }

        for (key, value, source) in build.equipment.stat_sources() {
            if key.is_derived() {
                return Err(EngineError::DerivedStat { key, origin: source });
            }
            stacks[key.index()].push(source, BASE_PRIORITY, MergeOp::Add, value);
        }

        let ranks = Ranks::new(build.refinement, build.talents);
        let mut ctx = StatContext::new(character.element, ranks);

        for effect in &effects {
            for contribution in &effect.contributions {
                stacks[contribution.key.index()].push(
                    effect.id.as_str(),
                    effect.priority,
                    contribution.op,
                    contribution.value,
                );
            }
            if let Some(directive) = effect.directive {
                ctx.push_override(ActiveOverride {
                    effect: effect.id.clone(),
                    priority: effect.priority,
                    directive,
                });
            }
        }

        for key in StatKey::all().filter(|k| !k.is_derived()) {
            ctx.set(key, stacks[key.index()].apply());
        }
        apply_derived(&mut ctx);

        tracing::debug!(
            character = %character.id,
            weapon = %weapon.id,
            refinement = build.refinement,
            effects = effects.len(),
            overrides = ctx.overrides().len(),
            "built stat context"
        );

        Ok(ctx)
    }
}

fn check_rank(key: RankKey, rank: u8, max: u8) -> Result<(), EngineError> {
    if rank == 0 || rank > max {
        return Err(EngineError::InvalidRank { key, rank, max });
    }
    Ok(())
}

/// Compute `total = base × (1 + percent) + flat` for HP, ATK and DEF.
fn apply_derived(ctx: &mut StatContext) {
    const DERIVED: [(StatKey, StatKey, StatKey, StatKey); 3] = [
        (StatKey::TotalHp, StatKey::BaseHp, StatKey::HpPercent, StatKey::Hp),
        (StatKey::TotalAtk, StatKey::BaseAtk, StatKey::AtkPercent, StatKey::Atk),
        (StatKey::TotalDef, StatKey::BaseDef, StatKey::DefPercent, StatKey::Def),
    ];

    for (total, base, percent, flat) in DERIVED {
        let value = ctx.get_or_zero(base) * (1.0 + ctx.get_or_zero(percent)) + ctx.get_or_zero(flat);
        ctx.set(total, value);
    }
}
