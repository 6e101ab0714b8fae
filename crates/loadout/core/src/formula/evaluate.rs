//! Formula evaluation logic.

use crate::error::EngineError;
use crate::formula::Node;
use crate::resolver;
use crate::stats::StatContext;
use crate::tables::Tables;

// ============================================================================
// Formula Evaluation
// ============================================================================

/// Evaluate a formula to get a numeric value.
///
/// ## Semantics
/// - `Sum`/`Product` fold left to right in authored order; empty sum is 0,
///   empty product is 1
/// - `Min`/`Max` of no operands is 0
/// - `Select` only evaluates the branch it picks
/// - `DmgBonus` asks [`resolver::resolve`] for the effective type and reads
///   that type's DMG bonus
///
/// ## Error Handling
/// - `MissingStat` if the context does not carry a stat
/// - `UnknownTable` if a table is not loaded
/// - `RankOutOfRange` if the context's rank is outside the table
pub fn evaluate(node: &Node, ctx: &StatContext, tables: &Tables) -> Result<f64, EngineError> {
    match node {
        Node::Constant(value) => Ok(*value),

        Node::Stat(key) => ctx.get(*key),

        Node::Table { table, rank } => tables.lookup(table, ctx.rank(*rank)),

        Node::DmgBonus(base) => {
            let effective = resolver::resolve(*base, ctx);
            ctx.get(effective.dmg_bonus_key())
        }

        Node::Sum(nodes) => nodes
            .iter()
            .try_fold(0.0, |acc, n| -> Result<f64, EngineError> {
                Ok(acc + evaluate(n, ctx, tables)?)
            }),

        Node::Product(nodes) => nodes
            .iter()
            .try_fold(1.0, |acc, n| -> Result<f64, EngineError> {
                Ok(acc * evaluate(n, ctx, tables)?)
            }),

        Node::Min(nodes) => fold_extreme(nodes, ctx, tables, f64::min),

        Node::Max(nodes) => fold_extreme(nodes, ctx, tables, f64::max),

        Node::Select {
            condition,
            then,
            otherwise,
        } => {
            let lhs = evaluate(&condition.node, ctx, tables)?;
            if condition.comparison.holds(lhs, condition.value) {
                evaluate(then, ctx, tables)
            } else {
                evaluate(otherwise, ctx, tables)
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn fold_extreme(
    nodes: &[Node],
    ctx: &StatContext,
    tables: &Tables,
    pick: fn(f64, f64) -> f64,
) -> Result<f64, EngineError> {
    let mut values = nodes.iter().map(|n| evaluate(n, ctx, tables));
    let Some(first) = values.next() else {
        return Ok(0.0);
    };
    values.try_fold(first?, |acc, v| -> Result<f64, EngineError> { Ok(pick(acc, v?)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::TalentLevels;
    use crate::catalogue::{EffectId, OverrideDirective, TableId};
    use crate::formula::Comparison;
    use crate::stats::{ActiveOverride, DamageType, Ranks, StatKey, TalentBaseType};
    use crate::tables::{DataTable, RankKey, TalentSlot};

    fn tables() -> Tables {
        [
            DataTable::percent("dmg", [41.3, 44.8, 48.3]),
            DataTable::flat("hits", [2.0, 2.0, 3.0]),
        ]
        .into_iter()
        .collect()
    }

    fn ctx(refinement: u8) -> StatContext {
        StatContext::zeroed(
            DamageType::Anemo,
            Ranks::new(refinement, TalentLevels::new(1, 2, 3)),
        )
        .with_stat(StatKey::TotalAtk, 1000.0)
    }

    #[test]
    fn atk_times_refinement_table() {
        let node = Node::product([
            Node::stat(StatKey::TotalAtk),
            Node::table("dmg", RankKey::Refinement),
        ]);
        let value = evaluate(&node, &ctx(3), &tables()).unwrap();
        assert!((value - 483.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let node = Node::sum([
            Node::product([
                Node::stat(StatKey::TotalAtk),
                Node::table("dmg", RankKey::Refinement),
            ]),
            Node::constant(0.1),
            Node::constant(0.2),
        ]);
        let first = evaluate(&node, &ctx(2), &tables()).unwrap();
        let second = evaluate(&node, &ctx(2), &tables()).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn talent_rank_lookup() {
        let node = Node::table("hits", RankKey::Talent(TalentSlot::Burst));
        assert_eq!(evaluate(&node, &ctx(1), &tables()), Ok(3.0));
    }

    #[test]
    fn rank_out_of_range_propagates() {
        let node = Node::table("dmg", RankKey::Talent(TalentSlot::Skill));
        let sparse_tables: Tables = [DataTable::percent("dmg", [41.3])].into_iter().collect();
        assert_eq!(
            evaluate(&node, &ctx(1), &sparse_tables),
            Err(EngineError::RankOutOfRange {
                table: TableId::new("dmg"),
                rank: 2,
                max: 1
            })
        );
    }

    #[test]
    fn select_only_evaluates_chosen_branch() {
        let node = Node::select(
            Node::stat(StatKey::ElementalMastery),
            Comparison::Gt,
            0.0,
            Node::table("missing", RankKey::Refinement),
            Node::constant(7.0),
        );
        assert_eq!(evaluate(&node, &ctx(1), &tables()), Ok(7.0));

        let em = ctx(1).with_stat(StatKey::ElementalMastery, 100.0);
        assert_eq!(
            evaluate(&node, &em, &tables()),
            Err(EngineError::UnknownTable(TableId::new("missing")))
        );
    }

    #[test]
    fn empty_aggregates() {
        let ctx = ctx(1);
        let tables = tables();
        assert_eq!(evaluate(&Node::sum([]), &ctx, &tables), Ok(0.0));
        assert_eq!(evaluate(&Node::product([]), &ctx, &tables), Ok(1.0));
        assert_eq!(evaluate(&Node::min([]), &ctx, &tables), Ok(0.0));
        assert_eq!(
            evaluate(
                &Node::max([Node::constant(2.0), Node::constant(5.0)]),
                &ctx,
                &tables
            ),
            Ok(5.0)
        );
    }

    #[test]
    fn missing_stat_in_sparse_context() {
        let sparse = StatContext::new(DamageType::Anemo, Ranks::default());
        assert_eq!(
            evaluate(&Node::stat(StatKey::CritDmg), &sparse, &tables()),
            Err(EngineError::MissingStat(StatKey::CritDmg))
        );
    }

    #[test]
    fn dmg_bonus_follows_resolved_type() {
        let node = Node::dmg_bonus(TalentBaseType::Physical);
        let plain = ctx(1)
            .with_stat(StatKey::PhysicalDmgBonus, 0.25)
            .with_stat(StatKey::PyroDmgBonus, 0.466);
        assert_eq!(evaluate(&node, &plain, &tables()), Ok(0.25));

        let infused = plain.with_override(ActiveOverride {
            effect: EffectId::new("pyro_infusion"),
            priority: 5,
            directive: OverrideDirective {
                targets: TalentBaseType::Physical,
                into: DamageType::Pyro,
            },
        });
        assert_eq!(evaluate(&node, &infused, &tables()), Ok(0.466));
    }
}
